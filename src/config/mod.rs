//! Configuration loading for tatami
//!
//! One TOML file, read once at startup and passed by reference into the
//! components that need it. Invalid keybind entries are logged and
//! skipped; a missing file falls back to the defaults so a bare `tatami`
//! always comes up.
//!
//! ```toml
//! workspaces = ["main", "web"]
//! autostart = ["swaybg -i ~/wall.png"]
//! socket = "/tmp/tatami.sock"
//!
//! [output]
//! width = 1920
//! height = 1080
//!
//! [[keybinds]]
//! mods = ["mod4"]
//! key = "Return"
//! cmd = "foot"
//! ```

use crate::models::{keysym_from_name, modifier_from_name, Keybind, Rect};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/tatami.sock";
pub const DEFAULT_WORKSPACE: &str = "main";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Raw file shape, before keybind names are resolved to masks/keysyms.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    workspaces: Vec<String>,
    #[serde(default)]
    autostart: Vec<String>,
    #[serde(default)]
    keybinds: Vec<KeybindEntry>,
    #[serde(default)]
    output: Option<OutputSection>,
    #[serde(default)]
    socket: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeybindEntry {
    #[serde(default)]
    mods: Vec<String>,
    key: String,
    cmd: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OutputSection {
    width: i32,
    height: i32,
}

/// Resolved configuration handed to the compositor at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub workspaces: Vec<String>,
    pub autostart: Vec<String>,
    pub keybinds: Vec<Keybind>,
    pub output: Rect,
    pub socket_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            workspaces: vec![DEFAULT_WORKSPACE.to_string()],
            autostart: Vec::new(),
            keybinds: Vec::new(),
            output: Rect::from_size(1920, 1080),
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location when none
    /// is given. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                info!(path = %path.display(), "loading configuration");
                let content = std::fs::read_to_string(path)?;
                Self::parse(&content)
            }
            None => {
                let default_path = Self::default_path();
                match default_path {
                    Some(path) if path.exists() => {
                        info!(path = %path.display(), "loading configuration");
                        let content = std::fs::read_to_string(&path)?;
                        Self::parse(&content)
                    }
                    _ => {
                        info!("no configuration file found, using defaults");
                        Ok(Config::default())
                    }
                }
            }
        }
    }

    /// `~/.config/tatami/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tatami").join("config.toml"))
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let defaults = Config::default();

        let workspaces = if file.workspaces.is_empty() {
            warn!("no workspaces configured, falling back to \"{DEFAULT_WORKSPACE}\"");
            defaults.workspaces
        } else {
            file.workspaces
        };

        let keybinds = file
            .keybinds
            .iter()
            .filter_map(resolve_keybind)
            .collect::<Vec<_>>();

        let output = file
            .output
            .map(|o| Rect::from_size(o.width, o.height))
            .unwrap_or(defaults.output);

        Ok(Config {
            workspaces,
            autostart: file.autostart,
            keybinds,
            output,
            socket_path: file.socket.unwrap_or(defaults.socket_path),
        })
    }
}

/// Resolve one keybind table; bad modifier or key names skip the entry.
fn resolve_keybind(entry: &KeybindEntry) -> Option<Keybind> {
    let mut mods = 0;
    for name in &entry.mods {
        match modifier_from_name(name) {
            Some(bit) => mods |= bit,
            None => {
                warn!(modifier = %name, "unknown modifier in configuration, skipping keybind");
                return None;
            }
        }
    }

    match keysym_from_name(&entry.key) {
        Some(keysym) => Some(Keybind::new(mods, keysym, entry.cmd.clone())),
        None => {
            warn!(key = %entry.key, "unknown key name in configuration, skipping keybind");
            None
        }
    }
}
