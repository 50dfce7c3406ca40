//! Workspace model: a named collection of toplevels

use serde::{Deserialize, Serialize};

/// A named workspace. Identity is the user-supplied name.
///
/// Workspaces own no toplevels directly; membership is computed by the
/// window registry from each toplevel's workspace reference. Name
/// uniqueness is not enforced at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub name: String,
}

impl Workspace {
    pub fn new(name: impl Into<String>) -> Self {
        Workspace { name: name.into() }
    }
}
