//! Compositor core: the single writer over all window and workspace state
//!
//! Every mutation of the registry, the workspace set, or focus happens
//! here, on one event-loop task. The display layer and the IPC listener
//! only talk to it through the [`Event`] enum; results for IPC requests
//! travel back over a oneshot channel. Handlers run to completion and
//! never block.

use crate::backend::Backend;
use crate::config::Config;
use crate::ipc::commands;
use crate::models::{Rect, Toplevel, ToplevelId};
use crate::process::spawn_shell;
use crate::services::{KeybindResolver, TilingEngine, WindowRegistry, WorkspaceManager};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

/// Events consumed by the compositor event loop.
///
/// The display layer translates its native callbacks into these; the IPC
/// listener contributes `Request`s.
#[derive(Debug)]
pub enum Event {
    /// A window became displayable.
    WindowMapped { title: String, app_id: String },
    /// A window was unmapped/destroyed by its client.
    WindowUnmapped { id: ToplevelId },
    /// A key press with the seat's current modifier mask and the resolved
    /// symbols for the pressed keycode.
    KeyPressed {
        mods: u32,
        syms: Vec<u32>,
        keycode: u32,
    },
    /// One remote-control request line; the serialized response payload is
    /// sent back over `reply`.
    Request {
        line: String,
        reply: oneshot::Sender<String>,
    },
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

pub struct Compositor {
    pub(crate) registry: WindowRegistry,
    pub(crate) workspaces: WorkspaceManager,
    tiling: TilingEngine,
    keybinds: KeybindResolver,
    backend: Box<dyn Backend>,
    output: Rect,
    focused: Option<ToplevelId>,
    grabbed: Option<ToplevelId>,
    running: bool,
}

impl Compositor {
    pub fn new(config: &Config, backend: Box<dyn Backend>) -> Self {
        Compositor {
            registry: WindowRegistry::new(),
            workspaces: WorkspaceManager::init_from_config(&config.workspaces),
            tiling: TilingEngine::default(),
            keybinds: KeybindResolver::new(config.keybinds.clone()),
            backend,
            output: config.output,
            focused: None,
            grabbed: None,
            running: true,
        }
    }

    /// Drain the event queue until an `exit` command stops the loop.
    pub async fn run(mut self, mut events: EventReceiver) {
        info!("compositor event loop running");
        while let Some(event) = events.recv().await {
            self.handle_event(event);
            if !self.running {
                break;
            }
        }
        info!("compositor event loop stopped");
    }

    /// Single dispatch point for all state mutation.
    pub fn handle_event(&mut self, event: Event) {
        trace!(?event, "handling event");
        match event {
            Event::WindowMapped { title, app_id } => {
                self.handle_map(title, app_id);
            }
            Event::WindowUnmapped { id } => self.handle_unmap(&id),
            Event::KeyPressed {
                mods,
                syms,
                keycode,
            } => self.handle_key_press(mods, &syms, keycode),
            Event::Request { line, reply } => {
                let payload = commands::execute(self, &line);
                if reply.send(payload).is_err() {
                    warn!("IPC client went away before the response was ready");
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Called by the `exit` command handler.
    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    pub fn focused(&self) -> Option<&ToplevelId> {
        self.focused.as_ref()
    }

    pub fn active_workspace(&self) -> &str {
        self.workspaces.active_name()
    }

    /// Read access to a live toplevel.
    pub fn toplevel(&self, id: &ToplevelId) -> Option<&Toplevel> {
        self.registry.get(id)
    }

    pub fn window_count(&self) -> usize {
        self.registry.len()
    }

    /// Mark a toplevel as the interactive move/resize grab target.
    pub fn begin_grab(&mut self, id: ToplevelId) {
        if self.registry.contains(&id) {
            self.grabbed = Some(id);
        }
    }

    pub fn grabbed(&self) -> Option<&ToplevelId> {
        self.grabbed.as_ref()
    }

    /// Register a freshly mapped window on the active workspace and hand
    /// it focus.
    pub fn handle_map(&mut self, title: String, app_id: String) -> ToplevelId {
        let toplevel = Toplevel::new(title, app_id, self.workspaces.active_name());
        info!(id = %toplevel.id, title = %toplevel.title, "window mapped");
        self.backend.create_visual(&toplevel);
        let id = self.registry.register(toplevel);
        self.focus(&id);
        id
    }

    /// Drop an unmapped window from both orderings and repair focus.
    pub fn handle_unmap(&mut self, id: &ToplevelId) {
        if self.grabbed.as_ref() == Some(id) {
            self.grabbed = None;
        }
        let held_focus = self.focused.as_ref() == Some(id);
        if self.registry.unregister(id).is_none() {
            warn!(%id, "unmap for unknown toplevel");
            return;
        }
        info!(%id, "window unmapped");
        if held_focus {
            self.focused = None;
            let next = self
                .registry
                .first_focused(self.workspaces.active_name())
                .map(|t| t.id.clone());
            if let Some(next) = next {
                self.focus(&next);
            }
        }
        self.redraw();
    }

    /// Give keyboard focus to `id`. Focusing the already-focused toplevel
    /// is a no-op; focusing a window on another workspace switches to it.
    pub fn focus(&mut self, id: &ToplevelId) {
        if self.focused.as_ref() == Some(id) {
            return;
        }
        let workspace = match self.registry.get(id) {
            Some(toplevel) => toplevel.workspace.clone(),
            None => return,
        };
        if let Some(prev) = self.focused.take() {
            self.backend.set_activated(&prev, false);
        }
        self.registry.promote_focus(id);
        self.workspaces.set_active(&workspace);
        self.backend.set_activated(id, true);
        self.backend.deliver_keyboard_focus(id);
        self.focused = Some(id.clone());
        debug!(%id, workspace = %workspace, "focus changed");
        self.redraw();
    }

    /// Switch the active workspace and re-focus its most recently focused
    /// toplevel, if any.
    pub fn switch_workspace(&mut self, name: &str) -> bool {
        if self.workspaces.find(name).is_none() {
            return false;
        }
        self.workspaces.set_active(name);
        info!(workspace = name, "switched workspace");
        let newfocus = self.registry.first_focused(name).map(|t| t.id.clone());
        if let Some(id) = newfocus {
            self.focus(&id);
        }
        self.redraw();
        true
    }

    /// Reassign a toplevel to another workspace and retile.
    pub fn move_to_workspace(&mut self, id: &ToplevelId, workspace: &str) {
        if let Some(toplevel) = self.registry.get_mut(id) {
            toplevel.workspace = workspace.to_string();
            debug!(%id, workspace, "moved toplevel");
        }
        self.redraw();
    }

    /// Promote a toplevel into the master slot and retile.
    pub fn set_master(&mut self, id: &ToplevelId) {
        self.registry.promote_master(id);
        self.redraw();
    }

    /// Ask the client to close; removal happens later via unmap.
    pub fn request_close(&mut self, id: &ToplevelId) {
        self.backend.request_close(id);
    }

    /// Visibility pass plus tiling pass over the active workspace.
    ///
    /// Hidden toplevels keep their registry membership and last geometry;
    /// they just receive no tiling updates until their workspace becomes
    /// active again.
    pub fn redraw(&mut self) {
        let active = self.workspaces.active_name().to_string();

        let visibility: Vec<(ToplevelId, bool)> = self
            .registry
            .iter()
            .map(|t| (t.id.clone(), t.workspace == active))
            .collect();
        for (id, visible) in &visibility {
            self.backend.set_visible(id, *visible);
        }

        let ids: Vec<ToplevelId> = self
            .registry
            .creation_order(&active)
            .map(|t| t.id.clone())
            .collect();
        let rects = self.tiling.layout(ids.len(), self.output);
        for (id, rect) in ids.iter().zip(rects) {
            if let Some(toplevel) = self.registry.get_mut(id) {
                toplevel.geometry = rect;
            }
            self.backend.set_position(id, rect.x, rect.y);
            self.backend.set_size(id, rect.width, rect.height);
        }
    }

    /// Resolve a key press against the keybind list; spawn the bound
    /// command or forward the raw event to the focused client.
    fn handle_key_press(&mut self, mods: u32, syms: &[u32], keycode: u32) {
        if let Some(keybind) = self.keybinds.resolve(mods, syms) {
            info!(cmd = %keybind.cmd, "executing keybind command");
            spawn_shell(&keybind.cmd);
            return;
        }
        if let Some(focused) = &self.focused {
            self.backend.forward_key(focused, keycode, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCall, CallLog, HeadlessBackend};
    use crate::config::Config;

    fn compositor_with(workspaces: &[&str]) -> (Compositor, CallLog) {
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let config = Config {
            workspaces: workspaces.iter().map(|s| s.to_string()).collect(),
            ..Config::default()
        };
        (Compositor::new(&config, Box::new(backend)), log)
    }

    #[test]
    fn mapping_a_window_focuses_it_on_the_active_workspace() {
        let (mut comp, log) = compositor_with(&["main", "web"]);
        let id = comp.handle_map("editor".into(), "code".into());
        assert_eq!(comp.focused(), Some(&id));
        assert_eq!(comp.registry.get(&id).unwrap().workspace, "main");
        let calls = log.snapshot();
        assert!(calls.contains(&BackendCall::CreateVisual(id.clone())));
        assert!(calls.contains(&BackendCall::DeliverKeyboardFocus(id.clone())));
        // Sole window tiles full screen.
        assert!(calls.contains(&BackendCall::SetSize(id, 1920, 1080)));
    }

    #[test]
    fn focus_is_idempotent() {
        let (mut comp, log) = compositor_with(&["main"]);
        let id = comp.handle_map("editor".into(), "code".into());
        log.clear();
        comp.focus(&id);
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn focusing_a_window_switches_to_its_workspace() {
        let (mut comp, _log) = compositor_with(&["main", "web"]);
        let a = comp.handle_map("a".into(), "app".into());
        comp.switch_workspace("web");
        let b = comp.handle_map("b".into(), "app".into());
        assert_eq!(comp.active_workspace(), "web");
        comp.focus(&a);
        assert_eq!(comp.active_workspace(), "main");
        assert_eq!(comp.focused(), Some(&a));
        comp.focus(&b);
        assert_eq!(comp.active_workspace(), "web");
    }

    #[test]
    fn unmap_of_focused_window_hands_focus_to_next_in_focus_order() {
        let (mut comp, _log) = compositor_with(&["main"]);
        let a = comp.handle_map("a".into(), "app".into());
        let b = comp.handle_map("b".into(), "app".into());
        assert_eq!(comp.focused(), Some(&b));
        comp.handle_unmap(&b);
        assert_eq!(comp.focused(), Some(&a));
        assert!(!comp.registry.contains(&b));
    }

    #[test]
    fn unmap_of_last_window_leaves_focus_unset() {
        let (mut comp, _log) = compositor_with(&["main"]);
        let a = comp.handle_map("a".into(), "app".into());
        comp.handle_unmap(&a);
        assert_eq!(comp.focused(), None);
        assert!(comp.registry.is_empty());
    }

    #[test]
    fn unmap_clears_the_grab_target() {
        let (mut comp, _log) = compositor_with(&["main"]);
        let a = comp.handle_map("a".into(), "app".into());
        comp.begin_grab(a.clone());
        assert_eq!(comp.grabbed(), Some(&a));
        comp.handle_unmap(&a);
        assert_eq!(comp.grabbed(), None);
    }

    #[test]
    fn switching_to_an_empty_workspace_hides_everything() {
        let (mut comp, log) = compositor_with(&["main", "web"]);
        let a = comp.handle_map("a".into(), "app".into());
        log.clear();
        comp.switch_workspace("web");
        let calls = log.snapshot();
        assert!(calls.contains(&BackendCall::SetVisible(a.clone(), false)));
        // Nothing is shown and nothing is tiled on the empty workspace.
        assert!(!calls.iter().any(|c| matches!(c, BackendCall::SetVisible(_, true))));
        assert!(!calls.iter().any(|c| matches!(c, BackendCall::SetSize(..))));
    }

    #[test]
    fn redraw_tiles_only_the_active_workspace() {
        let (mut comp, log) = compositor_with(&["main", "web"]);
        let a = comp.handle_map("a".into(), "app".into());
        comp.switch_workspace("web");
        let b = comp.handle_map("b".into(), "app".into());
        log.clear();
        comp.redraw();
        let calls = log.snapshot();
        assert!(calls.contains(&BackendCall::SetVisible(a.clone(), false)));
        assert!(calls.contains(&BackendCall::SetVisible(b.clone(), true)));
        assert!(calls.contains(&BackendCall::SetSize(b, 1920, 1080)));
        assert!(!calls.iter().any(|c| matches!(c, BackendCall::SetSize(id, _, _) if *id == a)));
    }

    #[test]
    fn master_and_stack_geometry_for_three_windows() {
        let (mut comp, _log) = compositor_with(&["main"]);
        let _a = comp.handle_map("a".into(), "app".into());
        let _b = comp.handle_map("b".into(), "app".into());
        let c = comp.handle_map("c".into(), "app".into());
        // Front of creation order is the latest map, so c holds the master
        // slot at half width, full height.
        assert_eq!(comp.registry.get(&c).unwrap().geometry, Rect::new(0, 0, 960, 1080));
        let heights: i32 = comp
            .registry
            .creation_order("main")
            .skip(1)
            .map(|t| t.geometry.height)
            .sum();
        assert_eq!(heights, 1080);
    }

    #[test]
    fn set_master_promotes_into_the_master_slot() {
        let (mut comp, _log) = compositor_with(&["main"]);
        let a = comp.handle_map("a".into(), "app".into());
        let _b = comp.handle_map("b".into(), "app".into());
        comp.set_master(&a);
        assert_eq!(comp.registry.first("main").unwrap().id, a);
        assert_eq!(comp.registry.get(&a).unwrap().geometry, Rect::new(0, 0, 960, 1080));
    }

    #[test]
    fn key_press_matching_no_keybind_forwards_to_focused_client() {
        let (mut comp, log) = compositor_with(&["main"]);
        let a = comp.handle_map("a".into(), "app".into());
        log.clear();
        comp.handle_event(Event::KeyPressed {
            mods: 0,
            syms: vec![0x61],
            keycode: 38,
        });
        assert_eq!(log.snapshot(), vec![BackendCall::ForwardKey(a, 38, true)]);
    }
}
