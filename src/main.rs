//! tatami - Tiling Compositor Control Core
//!
//! Binary entry point: parses CLI arguments, initializes logging, loads
//! the configuration, runs autostart commands, starts the IPC listener
//! task, and drives the compositor event loop until `exit`.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tatami::backend::HeadlessBackend;
use tatami::compositor::{event_channel, Compositor};
use tatami::config::Config;
use tatami::ipc::IpcListener;
use tatami::logging::{init_logging, LogConfig};
use tatami::process::spawn_shell;
use tracing::info;

#[derive(Parser)]
#[command(name = "tatami")]
#[command(about = "Tiling compositor control core")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Command to run once at startup
    #[arg(short = 's', long)]
    startup: Option<String>,

    /// Configuration file path (default: ~/.config/tatami/config.toml)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Control socket path (overrides the configured one)
    #[arg(long)]
    socket: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_env())
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;

    info!("tatami v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(socket) = cli.socket {
        config.socket_path = socket;
    }

    let (events, event_rx) = event_channel();

    let listener =
        IpcListener::bind(&config.socket_path, events.clone()).context("binding IPC socket")?;
    let socket_path = listener.socket_path().to_path_buf();
    tokio::spawn(listener.run());

    // Startup command and autostart entries are fire-and-forget.
    if let Some(cmd) = &cli.startup {
        spawn_shell(cmd);
    }
    for cmd in &config.autostart {
        info!(cmd = %cmd, "running autostart command");
        spawn_shell(cmd);
    }

    let compositor = Compositor::new(&config, Box::new(HeadlessBackend::new()));
    tokio::select! {
        _ = compositor.run(event_rx) => {}
        _ = shutdown_signal() => info!("shutdown signal received"),
    }

    if let Err(err) = std::fs::remove_file(&socket_path) {
        info!(error = %err, "could not remove control socket");
    }
    info!("tatami shut down");
    Ok(())
}

async fn shutdown_signal() {
    let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
    {
        Ok(sig) => sig,
        Err(err) => {
            tracing::warn!(error = %err, "failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}
