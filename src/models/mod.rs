//! Core data model for the tatami compositor

pub mod geometry;
pub mod keybind;
pub mod toplevel;
pub mod workspace;

pub use geometry::*;
pub use keybind::*;
pub use toplevel::*;
pub use workspace::*;
