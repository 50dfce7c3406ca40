//! Workspace manager: the named workspace set and the active pointer

use crate::models::Workspace;
use tracing::info;

/// Owns every workspace plus the single active-workspace pointer.
///
/// Once `init_from_config` has run, the active index always points into
/// the set; exactly one workspace is active at any time. `create` is
/// deliberately permissive about duplicate names, matching the protocol
/// clients' expectations.
#[derive(Debug, Default)]
pub struct WorkspaceManager {
    workspaces: Vec<Workspace>,
    active: usize,
}

impl WorkspaceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create every configured workspace in order. The first configured
    /// name becomes the initially active workspace.
    pub fn init_from_config(names: &[String]) -> Self {
        let mut manager = WorkspaceManager::new();
        for name in names {
            manager.create(name);
        }
        manager
    }

    /// Append a workspace. Name collisions are not checked.
    pub fn create(&mut self, name: &str) -> &Workspace {
        info!(name, "create workspace");
        self.workspaces.push(Workspace::new(name));
        self.workspaces.last().expect("just pushed")
    }

    /// Linear scan by name; absence is a normal result.
    pub fn find(&self, name: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|ws| ws.name == name)
    }

    pub fn active(&self) -> Option<&Workspace> {
        self.workspaces.get(self.active)
    }

    /// Name of the active workspace. Panics only before initialization,
    /// which the compositor constructor rules out.
    pub fn active_name(&self) -> &str {
        &self.workspaces[self.active].name
    }

    /// Point the active-workspace pointer at `name`. Returns false if no
    /// workspace carries that name.
    pub fn set_active(&mut self, name: &str) -> bool {
        match self.workspaces.iter().position(|ws| ws.name == name) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workspace> {
        self.workspaces.iter()
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_from_config_preserves_order_and_activates_first() {
        let names = vec!["main".to_string(), "web".to_string(), "chat".to_string()];
        let manager = WorkspaceManager::init_from_config(&names);
        let listed: Vec<_> = manager.iter().map(|ws| ws.name.as_str()).collect();
        assert_eq!(listed, vec!["main", "web", "chat"]);
        assert_eq!(manager.active_name(), "main");
    }

    #[test]
    fn set_active_only_accepts_known_names() {
        let mut manager = WorkspaceManager::init_from_config(&["main".into(), "web".into()]);
        assert!(manager.set_active("web"));
        assert_eq!(manager.active_name(), "web");
        assert!(!manager.set_active("nope"));
        assert_eq!(manager.active_name(), "web");
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let mut manager = WorkspaceManager::init_from_config(&["main".into()]);
        manager.create("main");
        assert_eq!(manager.len(), 2);
        // find returns the first of the duplicates
        assert!(manager.find("main").is_some());
    }
}
