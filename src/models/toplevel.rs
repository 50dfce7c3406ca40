//! Toplevel model: a single application window tracked by the compositor

use crate::models::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Short stable identifier assigned when a toplevel is registered.
///
/// Eight hex characters from a v4 uuid: short enough to type into
/// `tatamictl`, unique enough for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToplevelId(String);

impl ToplevelId {
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        ToplevelId(uuid[..8].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToplevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToplevelId {
    fn from(value: &str) -> Self {
        ToplevelId(value.to_string())
    }
}

/// A mapped application window.
///
/// The workspace reference is by name and reassignable; membership in the
/// creation and focus orderings is owned by the window registry, not stored
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct Toplevel {
    pub id: ToplevelId,
    pub title: String,
    pub app_id: String,
    pub workspace: String,
    pub geometry: Rect,
}

impl Toplevel {
    pub fn new(title: impl Into<String>, app_id: impl Into<String>, workspace: impl Into<String>) -> Self {
        Toplevel {
            id: ToplevelId::generate(),
            title: title.into(),
            app_id: app_id.into(),
            workspace: workspace.into(),
            geometry: Rect::default(),
        }
    }
}
