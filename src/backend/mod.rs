//! Display-layer boundary
//!
//! Everything the compositor core needs from the display server is behind
//! [`Backend`]: surface creation, geometry, visibility, activation,
//! keyboard focus delivery, close requests, and key forwarding. A real
//! display layer translates these into its native scene-graph calls; the
//! bundled [`HeadlessBackend`] records them, which is what the test suite
//! and the headless binary run against.

use crate::models::{Toplevel, ToplevelId};
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Calls the compositor core issues toward the display layer.
pub trait Backend: Send {
    fn create_visual(&mut self, toplevel: &Toplevel);
    fn set_position(&mut self, id: &ToplevelId, x: i32, y: i32);
    fn set_size(&mut self, id: &ToplevelId, width: i32, height: i32);
    fn set_visible(&mut self, id: &ToplevelId, visible: bool);
    fn set_activated(&mut self, id: &ToplevelId, activated: bool);
    fn deliver_keyboard_focus(&mut self, id: &ToplevelId);
    fn request_close(&mut self, id: &ToplevelId);
    /// Forward an unhandled key event to the focused client.
    fn forward_key(&mut self, id: &ToplevelId, keycode: u32, pressed: bool);
}

/// One recorded backend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    CreateVisual(ToplevelId),
    SetPosition(ToplevelId, i32, i32),
    SetSize(ToplevelId, i32, i32),
    SetVisible(ToplevelId, bool),
    SetActivated(ToplevelId, bool),
    DeliverKeyboardFocus(ToplevelId),
    RequestClose(ToplevelId),
    ForwardKey(ToplevelId, u32, bool),
}

/// Shared view into a [`HeadlessBackend`]'s call log.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<BackendCall>>>);

impl CallLog {
    pub fn snapshot(&self) -> Vec<BackendCall> {
        self.0.lock().expect("call log poisoned").clone()
    }

    pub fn clear(&self) {
        self.0.lock().expect("call log poisoned").clear();
    }

    fn push(&self, call: BackendCall) {
        self.0.lock().expect("call log poisoned").push(call);
    }
}

/// Backend that records every call instead of talking to a display server.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    log: CallLog,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the call log, valid after the backend is boxed away.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Backend for HeadlessBackend {
    fn create_visual(&mut self, toplevel: &Toplevel) {
        trace!(id = %toplevel.id, "create_visual");
        self.log.push(BackendCall::CreateVisual(toplevel.id.clone()));
    }

    fn set_position(&mut self, id: &ToplevelId, x: i32, y: i32) {
        self.log.push(BackendCall::SetPosition(id.clone(), x, y));
    }

    fn set_size(&mut self, id: &ToplevelId, width: i32, height: i32) {
        self.log.push(BackendCall::SetSize(id.clone(), width, height));
    }

    fn set_visible(&mut self, id: &ToplevelId, visible: bool) {
        self.log.push(BackendCall::SetVisible(id.clone(), visible));
    }

    fn set_activated(&mut self, id: &ToplevelId, activated: bool) {
        self.log.push(BackendCall::SetActivated(id.clone(), activated));
    }

    fn deliver_keyboard_focus(&mut self, id: &ToplevelId) {
        self.log.push(BackendCall::DeliverKeyboardFocus(id.clone()));
    }

    fn request_close(&mut self, id: &ToplevelId) {
        self.log.push(BackendCall::RequestClose(id.clone()));
    }

    fn forward_key(&mut self, id: &ToplevelId, keycode: u32, pressed: bool) {
        self.log.push(BackendCall::ForwardKey(id.clone(), keycode, pressed));
    }
}
