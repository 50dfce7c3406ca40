//! Window registry: the canonical set of toplevels and their orderings
//!
//! The registry owns every live toplevel in a central arena keyed by its
//! stable id, plus two index vectors over the same ids:
//!
//! - *creation order*: front is the most recently created (or explicitly
//!   promoted) toplevel. The tiling engine fills the master slot from the
//!   front of this order.
//! - *focus order*: front is the most recently focused toplevel.
//!
//! Invariant: a live toplevel appears in the arena and in both index
//! vectors exactly once; unregistering removes it from all three at once.

use crate::models::{Toplevel, ToplevelId};
use crate::TatamiError;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct WindowRegistry {
    arena: HashMap<ToplevelId, Toplevel>,
    creation: Vec<ToplevelId>,
    focus: Vec<ToplevelId>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly mapped toplevel at the front of both orderings.
    pub fn register(&mut self, toplevel: Toplevel) -> ToplevelId {
        let id = toplevel.id.clone();
        debug!(id = %id, workspace = %toplevel.workspace, "registering toplevel");
        self.creation.insert(0, id.clone());
        self.focus.insert(0, id.clone());
        self.arena.insert(id.clone(), toplevel);
        id
    }

    /// Remove a destroyed toplevel from the arena and both orderings.
    pub fn unregister(&mut self, id: &ToplevelId) -> Option<Toplevel> {
        self.creation.retain(|t| t != id);
        self.focus.retain(|t| t != id);
        let removed = self.arena.remove(id);
        if removed.is_some() {
            debug!(id = %id, "unregistered toplevel");
        }
        removed
    }

    pub fn get(&self, id: &ToplevelId) -> Option<&Toplevel> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: &ToplevelId) -> Option<&mut Toplevel> {
        self.arena.get_mut(id)
    }

    /// Linear scan by id string; unknown ids are a typed not-found result.
    pub fn lookup(&self, id: &str) -> Result<&Toplevel, TatamiError> {
        self.creation
            .iter()
            .find(|t| t.as_str() == id)
            .and_then(|t| self.arena.get(t))
            .ok_or_else(|| TatamiError::WindowNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &ToplevelId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Move a toplevel to the front of the focus order.
    pub fn promote_focus(&mut self, id: &ToplevelId) {
        if let Some(pos) = self.focus.iter().position(|t| t == id) {
            let id = self.focus.remove(pos);
            self.focus.insert(0, id);
        }
    }

    /// Move a toplevel to the front of the creation order, making it the
    /// master-slot candidate for the next tiling pass.
    pub fn promote_master(&mut self, id: &ToplevelId) {
        if let Some(pos) = self.creation.iter().position(|t| t == id) {
            let id = self.creation.remove(pos);
            self.creation.insert(0, id);
        }
    }

    /// First toplevel of `workspace` by creation order: the master
    /// candidate by position, not recency.
    pub fn first(&self, workspace: &str) -> Option<&Toplevel> {
        self.creation_order(workspace).next()
    }

    /// Most recently focused toplevel of `workspace`.
    pub fn first_focused(&self, workspace: &str) -> Option<&Toplevel> {
        self.focus_order(workspace).next()
    }

    /// Second entry of the workspace-filtered focus order, used for
    /// cycling and master-swap.
    pub fn next_focused(&self, workspace: &str) -> Option<&Toplevel> {
        self.focus_order(workspace).nth(1)
    }

    /// Least recently focused toplevel of `workspace`; the target of
    /// round-robin cycling.
    pub fn last_focused(&self, workspace: &str) -> Option<&Toplevel> {
        self.focus_order(workspace).last()
    }

    /// Workspace-filtered view of the creation order, front first.
    pub fn creation_order<'a, 'b>(
        &'a self,
        workspace: &'b str,
    ) -> impl Iterator<Item = &'a Toplevel> + use<'a, 'b> {
        self.creation
            .iter()
            .filter_map(|id| self.arena.get(id))
            .filter(move |t| t.workspace == workspace)
    }

    /// Workspace-filtered view of the focus order, front first.
    pub fn focus_order<'a, 'b>(
        &'a self,
        workspace: &'b str,
    ) -> impl Iterator<Item = &'a Toplevel> + use<'a, 'b> {
        self.focus
            .iter()
            .filter_map(|id| self.arena.get(id))
            .filter(move |t| t.workspace == workspace)
    }

    /// All live toplevels in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Toplevel> {
        self.creation.iter().filter_map(|id| self.arena.get(id))
    }

    pub fn workspace_len(&self, workspace: &str) -> usize {
        self.creation_order(workspace).count()
    }
}
