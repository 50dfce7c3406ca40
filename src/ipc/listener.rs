//! Unix socket listener task
//!
//! Accepts connections and handles exactly one request/response pair per
//! connection. The listener never mutates compositor state itself: each
//! request line becomes an [`Event::Request`] on the event-loop queue, and
//! the task waits on a oneshot channel for the payload to send back. That
//! keeps the single-writer invariant over all window/workspace state.

use crate::compositor::{Event, EventSender};
use crate::ipc::protocol::{error_payload, write_frame, MAX_REQUEST_BYTES};
use crate::TatamiError;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

pub struct IpcListener {
    listener: UnixListener,
    socket_path: PathBuf,
    events: EventSender,
}

impl IpcListener {
    /// Bind the control socket, replacing a stale file from a previous run.
    pub fn bind(socket_path: &Path, events: EventSender) -> std::io::Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)?;
        }
        let listener = UnixListener::bind(socket_path)?;
        info!(path = %socket_path.display(), "IPC listener bound");
        Ok(IpcListener {
            listener,
            socket_path: socket_path.to_path_buf(),
            events,
        })
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Accept loop. Ends when the event loop side of the queue is dropped.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, _addr)) => {
                    let events = self.events.clone();
                    tokio::spawn(async move {
                        if let Err(err) = handle_connection(stream, events).await {
                            debug!(error = %err, "IPC connection ended with error");
                        }
                    });
                }
                Err(err) => {
                    warn!(error = %err, "failed to accept IPC connection");
                }
            }
        }
    }
}

/// Read one request (client half-closes after writing), route it through
/// the event loop, write one framed response, close.
async fn handle_connection(mut stream: UnixStream, events: EventSender) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut reader = (&mut stream).take(MAX_REQUEST_BYTES as u64 + 1);
    reader.read_to_end(&mut request).await?;

    if request.len() > MAX_REQUEST_BYTES {
        let payload = error_payload(&TatamiError::RequestTooLarge(MAX_REQUEST_BYTES));
        return write_frame(&mut stream, &payload).await;
    }

    let line = String::from_utf8_lossy(&request).into_owned();
    debug!(request = %line.trim(), "IPC request");

    let (reply_tx, reply_rx) = oneshot::channel();
    let payload = if events
        .send(Event::Request {
            line,
            reply: reply_tx,
        })
        .is_ok()
    {
        match reply_rx.await {
            Ok(payload) => payload,
            // Event loop dropped the reply sender mid-shutdown.
            Err(_) => shutdown_payload(),
        }
    } else {
        // Event loop already gone; nothing left to execute against.
        shutdown_payload()
    };

    write_frame(&mut stream, &payload).await
}

fn shutdown_payload() -> String {
    serde_json::json!({ "error": "compositor is shutting down" }).to_string()
}
