//! Keybinding resolver: maps (modifier mask, keysym) to a shell command

use crate::models::Keybind;
use tracing::debug;

/// Resolves key-press events against the configured keybind list.
///
/// The list is immutable after load. A physical key can carry several
/// resolved symbols (compose state), so resolution walks the symbols in
/// order and, for each, scans the keybinds in configuration order; the
/// first entry whose modifier mask equals the event mask *exactly* and
/// whose symbol matches wins. Key releases never resolve.
#[derive(Debug, Default)]
pub struct KeybindResolver {
    keybinds: Vec<Keybind>,
}

impl KeybindResolver {
    pub fn new(keybinds: Vec<Keybind>) -> Self {
        KeybindResolver { keybinds }
    }

    pub fn resolve(&self, mods: u32, syms: &[u32]) -> Option<&Keybind> {
        for &sym in syms {
            for keybind in &self.keybinds {
                if keybind.mods == mods && keybind.keysym == sym {
                    debug!(cmd = %keybind.cmd, "keybind matched");
                    return Some(keybind);
                }
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.keybinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keybinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::modifiers;

    fn resolver() -> KeybindResolver {
        KeybindResolver::new(vec![
            Keybind::new(modifiers::LOGO, 0xff0d, "foot"),
            Keybind::new(modifiers::LOGO | modifiers::SHIFT, 0x71, "tatamictl exit"),
            Keybind::new(modifiers::LOGO, 0x71, "close"),
        ])
    }

    #[test]
    fn exact_mask_match_required() {
        let resolver = resolver();
        assert!(resolver.resolve(modifiers::LOGO, &[0xff0d]).is_some());
        // A superset of the configured mask is not a match.
        assert!(resolver
            .resolve(modifiers::LOGO | modifiers::CTRL, &[0xff0d])
            .is_none());
        // Neither is a subset.
        assert!(resolver.resolve(0, &[0xff0d]).is_none());
    }

    #[test]
    fn first_configured_entry_wins() {
        let resolver = KeybindResolver::new(vec![
            Keybind::new(modifiers::LOGO, 0x61, "first"),
            Keybind::new(modifiers::LOGO, 0x61, "second"),
        ]);
        assert_eq!(resolver.resolve(modifiers::LOGO, &[0x61]).unwrap().cmd, "first");
    }

    #[test]
    fn symbols_are_tried_in_order() {
        let resolver = resolver();
        let matched = resolver
            .resolve(modifiers::LOGO | modifiers::SHIFT, &[0x51, 0x71])
            .unwrap();
        assert_eq!(matched.cmd, "tatamictl exit");
    }

    #[test]
    fn no_match_reports_none() {
        assert!(resolver().resolve(modifiers::ALT, &[0x41]).is_none());
    }
}
