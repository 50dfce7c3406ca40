//! Detached process spawning with asynchronous child reaping
//!
//! Keybind actions, autostart entries, and the startup command are all
//! fire-and-forget shell invocations: the compositor never waits on them
//! inline. Each spawned child gets a companion task that awaits its exit
//! status, so terminated children are reaped instead of accumulating as
//! zombies.

use tokio::process::Command;
use tracing::{debug, warn};

/// Spawn `cmd` through `/bin/sh -c` without waiting for it.
///
/// Failures are logged and swallowed; a broken autostart line must not
/// take the compositor down.
pub fn spawn_shell(cmd: &str) {
    debug!(cmd, "spawning shell command");
    match Command::new("/bin/sh").arg("-c").arg(cmd).spawn() {
        Ok(mut child) => {
            let cmd = cmd.to_string();
            tokio::spawn(async move {
                match child.wait().await {
                    Ok(status) if !status.success() => {
                        debug!(cmd = %cmd, %status, "command exited with failure status");
                    }
                    Ok(_) => {}
                    Err(err) => warn!(cmd = %cmd, error = %err, "failed to reap child"),
                }
            });
        }
        Err(err) => warn!(cmd, error = %err, "failed to spawn command"),
    }
}
