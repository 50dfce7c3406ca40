//! tatamictl - control client for the tatami compositor
//!
//! Joins its positional arguments into one request line, sends it over
//! the control socket, reads exactly one length-prefixed response, and
//! prints it. Output is human-readable by default; `--json` prints the
//! raw payload. Formatting is presentation only, never part of the
//! protocol contract.

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use tatami::config::DEFAULT_SOCKET_PATH;
use tatami::ipc::read_frame;
use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;

#[derive(Parser)]
#[command(name = "tatamictl")]
#[command(about = "Remote control for the tatami compositor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Print the raw JSON payload instead of the readable rendering
    #[arg(long)]
    json: bool,

    /// Control socket path
    #[arg(long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,

    /// Command words, joined with single spaces into the request line
    #[arg(required = true, trailing_var_arg = true)]
    command: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let request = cli.command.join(" ");

    let mut stream = UnixStream::connect(&cli.socket)
        .await
        .with_context(|| format!("connecting to {}", cli.socket.display()))?;

    stream
        .write_all(request.as_bytes())
        .await
        .context("sending request")?;
    // Half-close so the server sees EOF on the request.
    stream.shutdown().await.context("closing write side")?;

    let payload = read_frame(&mut stream).await.context("reading response")?;

    if cli.json {
        println!("{payload}");
    } else {
        match serde_json::from_str::<Value>(&payload) {
            Ok(value) => print_value(&value, 0),
            Err(_) => println!("{payload}"),
        }
    }

    Ok(())
}

/// Render a payload the way a human wants to read it: scalars bare,
/// objects as `key: value` lines, arrays indented per element.
fn print_value(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                match inner {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{pad}{key}:");
                        print_value(inner, indent + 1);
                    }
                    _ => println!("{pad}{key}: {}", scalar(inner)),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                print_value(item, indent);
                if matches!(item, Value::Object(_)) {
                    println!();
                }
            }
        }
        other => println!("{pad}{}", scalar(other)),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
