//! Keybind model: (modifier mask, keysym) -> shell command

use serde::{Deserialize, Serialize};

/// Modifier bit values matching the seat modifier mask delivered with key
/// events.
pub mod modifiers {
    pub const SHIFT: u32 = 1 << 0;
    pub const CAPS: u32 = 1 << 1;
    pub const CTRL: u32 = 1 << 2;
    pub const ALT: u32 = 1 << 3;
    pub const MOD2: u32 = 1 << 4;
    pub const MOD3: u32 = 1 << 5;
    pub const LOGO: u32 = 1 << 6;
    pub const MOD5: u32 = 1 << 7;
}

/// An immutable keyboard shortcut loaded from configuration.
///
/// Many keybinds may share a command; resolution is first-match in
/// configuration order with exact modifier-mask equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybind {
    pub mods: u32,
    pub keysym: u32,
    pub cmd: String,
}

impl Keybind {
    pub fn new(mods: u32, keysym: u32, cmd: impl Into<String>) -> Self {
        Keybind {
            mods,
            keysym,
            cmd: cmd.into(),
        }
    }
}

/// Parse a modifier name as written in the configuration file.
pub fn modifier_from_name(name: &str) -> Option<u32> {
    match name {
        "shift" => Some(modifiers::SHIFT),
        "caps" => Some(modifiers::CAPS),
        "ctrl" => Some(modifiers::CTRL),
        "alt" | "mod1" => Some(modifiers::ALT),
        "mod2" => Some(modifiers::MOD2),
        "mod3" => Some(modifiers::MOD3),
        "mod4" | "super" | "logo" => Some(modifiers::LOGO),
        "mod5" => Some(modifiers::MOD5),
        _ => None,
    }
}

/// Resolve a key name to an X11 keysym value.
///
/// Covers the printable latin range plus the named keys the default
/// configuration uses. Single printable ASCII characters map to their
/// codepoint, which is exactly their keysym value.
pub fn keysym_from_name(name: &str) -> Option<u32> {
    if name.len() == 1 {
        let ch = name.chars().next().unwrap();
        if ch.is_ascii_graphic() {
            return Some(ch as u32);
        }
    }

    match name {
        "space" => Some(0x0020),
        "Return" | "return" => Some(0xff0d),
        "Escape" | "escape" => Some(0xff1b),
        "Tab" | "tab" => Some(0xff09),
        "BackSpace" | "backspace" => Some(0xff08),
        "Delete" | "delete" => Some(0xffff),
        "Left" | "left" => Some(0xff51),
        "Up" | "up" => Some(0xff52),
        "Right" | "right" => Some(0xff53),
        "Down" | "down" => Some(0xff54),
        _ => {
            // F1..F12
            if let Some(n) = name.strip_prefix('F').and_then(|n| n.parse::<u32>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(0xffbe + n - 1);
                }
            }
            None
        }
    }
}
