//! Pure domain types with minimal dependencies
//!
//! Types here have no framework dependencies (cosmic, iced, etc.)
//! so that both the session logic and the optional GUI can share them.

pub mod draw_state;
pub mod geometry;

pub use draw_state::*;
pub use geometry::*;
