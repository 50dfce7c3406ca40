//! tatami - Tiling Compositor Control Core
//!
//! tatami tracks application windows (toplevels), groups them into named
//! workspaces, computes a master-stack tiling layout, resolves keyboard
//! shortcuts to shell commands, and exposes a textual remote-control
//! protocol over a Unix socket for the `tatamictl` client.
//!
//! The display-server side (rendering, buffer allocation, raw input
//! devices) lives behind the [`backend::Backend`] trait; tatami itself is
//! the single-writer state machine in between.

pub mod backend;
pub mod compositor;
pub mod config;
pub mod ipc;
pub mod logging;
pub mod models;
pub mod process;
pub mod services;

pub use models::*;
pub use services::*;

/// Result type alias for tatami operations
pub type Result<T> = anyhow::Result<T>;

/// Recoverable error taxonomy for tatami operations.
///
/// Display strings double as the `error` payload of IPC responses, so they
/// stay in the exact wording the protocol clients expect.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TatamiError {
    #[error("window {0} not found")]
    WindowNotFound(String),

    #[error("workspace {0} not found")]
    WorkspaceNotFound(String),

    #[error("no window found")]
    NoWindowFound,

    #[error("no focused window to move")]
    NoFocusedWindow,

    #[error("No windows found")]
    NoWindowsOpen,

    #[error("No workspaces found")]
    NoWorkspaces,

    #[error("Workspace is empty")]
    WorkspaceEmpty,

    #[error("Only one current window open")]
    OnlyOneWindow,

    #[error("the current window is already master")]
    AlreadyMaster,

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("unknown command {0}")]
    UnknownCommand(String),

    #[error("request exceeds {0} tokens")]
    TooManyTokens(usize),

    #[error("request exceeds {0} bytes")]
    RequestTooLarge(usize),

    #[error("empty request")]
    EmptyRequest,

    #[error("configuration error: {0}")]
    ConfigurationError(String),
}
