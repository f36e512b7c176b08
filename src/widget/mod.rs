pub mod resize_label;
pub mod toolbar;
