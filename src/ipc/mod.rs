//! Remote-control IPC: textual request/response protocol over a Unix socket
//!
//! One request per connection. The listener task never touches compositor
//! state; it forwards each request line into the event loop and writes the
//! length-prefixed response it gets back.

pub mod commands;
pub mod listener;
pub mod protocol;

pub use listener::IpcListener;
pub use protocol::{read_frame, write_frame, Response, MAX_REQUEST_BYTES, MAX_TOKENS};
