//! Wire protocol: tokenizing, response payloads, and frame codec
//!
//! A request is a single whitespace-delimited line; the response is one
//! self-describing JSON payload (an object with a `success` or `error`
//! key, or an array for list commands) framed as an 8-byte little-endian
//! length prefix followed by exactly that many UTF-8 payload bytes. The
//! prefix lets the client read one complete response without depending on
//! connection close.

use crate::TatamiError;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Hard cap on tokens per request; exceeding it is a typed error.
pub const MAX_TOKENS: usize = 5;

/// Hard cap on request bytes read from one connection.
pub const MAX_REQUEST_BYTES: usize = 1024;

/// Split a request line on whitespace (space, tab, newline), collapsing
/// runs and producing no empty tokens.
pub fn tokenize(line: &str) -> Result<Vec<&str>, TatamiError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(TatamiError::EmptyRequest);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(TatamiError::TooManyTokens(MAX_TOKENS));
    }
    Ok(tokens)
}

/// One entry of `window list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowEntry {
    pub id: String,
    pub app: String,
    pub title: String,
    pub workspace: String,
}

/// One entry of `workspace list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceEntry {
    pub name: String,
    pub active: bool,
}

/// Successful command results before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(String),
    Windows(Vec<WindowEntry>),
    Workspaces(Vec<WorkspaceEntry>),
}

impl Response {
    /// Serialize into the single response payload.
    pub fn to_payload(&self) -> String {
        match self {
            Response::Success(message) => {
                serde_json::json!({ "success": message }).to_string()
            }
            Response::Windows(entries) => {
                serde_json::to_string(entries).expect("window entries serialize")
            }
            Response::Workspaces(entries) => {
                serde_json::to_string(entries).expect("workspace entries serialize")
            }
        }
    }
}

/// Serialize an error into the same channel successes use.
pub fn error_payload(err: &TatamiError) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}

/// Write one length-prefixed payload: 8-byte little-endian length, then
/// the UTF-8 bytes.
pub async fn write_frame<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    payload: &str,
) -> std::io::Result<()> {
    let bytes = payload.as_bytes();
    writer.write_all(&(bytes.len() as u64).to_le_bytes()).await?;
    writer.write_all(bytes).await?;
    writer.flush().await
}

/// Read one length-prefixed payload.
pub async fn read_frame<R: AsyncReadExt + Unpin>(reader: &mut R) -> std::io::Result<String> {
    let mut len_bytes = [0u8; 8];
    reader.read_exact(&mut len_bytes).await?;
    let len = u64::from_le_bytes(len_bytes) as usize;
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    String::from_utf8(payload)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_collapses_mixed_delimiters() {
        assert_eq!(
            tokenize(" window\tmove-to  office\nabc12345 ").unwrap(),
            vec!["window", "move-to", "office", "abc12345"]
        );
    }

    #[test]
    fn tokenize_rejects_empty_and_oversized_requests() {
        assert_eq!(tokenize("   \t\n"), Err(TatamiError::EmptyRequest));
        assert_eq!(
            tokenize("a b c d e f"),
            Err(TatamiError::TooManyTokens(MAX_TOKENS))
        );
    }

    #[test]
    fn success_payloads_are_self_describing() {
        let payload = Response::Success("switch to workspace web".into()).to_payload();
        assert_eq!(payload, r#"{"success":"switch to workspace web"}"#);
    }

    #[test]
    fn list_payloads_are_arrays() {
        let payload = Response::Workspaces(vec![
            WorkspaceEntry {
                name: "main".into(),
                active: true,
            },
            WorkspaceEntry {
                name: "web".into(),
                active: false,
            },
        ])
        .to_payload();
        assert_eq!(
            payload,
            r#"[{"name":"main","active":true},{"name":"web","active":false}]"#
        );
    }

    #[test]
    fn error_payload_uses_the_error_key() {
        let payload = error_payload(&TatamiError::WindowNotFound("abc".into()));
        assert_eq!(payload, r#"{"error":"window abc not found"}"#);
    }

    #[tokio::test]
    async fn frame_round_trip() {
        let mut buf = Vec::new();
        write_frame(&mut buf, "{\"success\":\"ok\"}").await.unwrap();
        assert_eq!(&buf[..8], &(16u64).to_le_bytes());
        let mut cursor = std::io::Cursor::new(buf);
        let payload = read_frame(&mut cursor).await.unwrap();
        assert_eq!(payload, "{\"success\":\"ok\"}");
    }
}
