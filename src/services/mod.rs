//! Core services for the tatami compositor

pub mod keyboard_handler;
pub mod tiling_engine;
pub mod window_registry;
pub mod workspace_manager;

pub use keyboard_handler::*;
pub use tiling_engine::*;
pub use window_registry::*;
pub use workspace_manager::*;
