//! Annotation toolbar and selection size readout for screenshot capture
//! sessions.
//!
//! The toolkit-independent core lives in [`draw`], [`draw_toolbar`],
//! [`resize_toolbar`] and [`session`]. The COSMIC front end is behind the
//! `gui` feature.

pub mod config;
pub mod domain;
pub mod draw;
pub mod draw_toolbar;
pub mod localize;
pub mod resize_toolbar;
pub mod session;

#[cfg(feature = "gui")]
pub mod core;
#[cfg(feature = "gui")]
pub mod widget;
