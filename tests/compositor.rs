//! End-to-end behavior of the compositor core over the headless backend:
//! layout math, focus bookkeeping, and the command surface working
//! together the way a session exercises them.

use tatami::backend::{BackendCall, CallLog, HeadlessBackend};
use tatami::compositor::Compositor;
use tatami::config::Config;
use tatami::ipc::commands::execute;
use tatami::models::Rect;

fn session(workspaces: &[&str]) -> (Compositor, CallLog) {
    let backend = HeadlessBackend::new();
    let log = backend.log();
    let config = Config {
        workspaces: workspaces.iter().map(|s| s.to_string()).collect(),
        output: Rect::from_size(1920, 1080),
        ..Config::default()
    };
    (Compositor::new(&config, Box::new(backend)), log)
}

#[test]
fn sole_window_occupies_the_whole_output() {
    let (mut comp, _log) = session(&["main"]);
    let id = comp.handle_map("editor".into(), "code".into());
    assert_eq!(
        comp.toplevel(&id).unwrap().geometry,
        Rect::new(0, 0, 1920, 1080)
    );
}

#[test]
fn master_and_stack_columns_partition_the_output() {
    for n in 2..6 {
        let (mut comp, _log) = session(&["main"]);
        let ids: Vec<_> = (0..n)
            .map(|i| comp.handle_map(format!("w{i}"), "app".into()))
            .collect();

        // Front of creation order (the last map) is the master window.
        let master = comp.toplevel(ids.last().unwrap()).unwrap().geometry;
        assert_eq!(master.width, 960, "n = {n}");
        assert_eq!(master.height, 1080, "n = {n}");

        let stack: Vec<Rect> = ids[..n - 1]
            .iter()
            .map(|id| comp.toplevel(id).unwrap().geometry)
            .collect();
        let stack_height: i32 = stack.iter().map(|r| r.height).sum();
        assert_eq!(stack_height, 1080, "n = {n}");
        assert!(stack.iter().all(|r| r.x == 960 && r.width == 960));
    }
}

#[test]
fn focus_again_changes_nothing_observable() {
    let (mut comp, log) = session(&["main"]);
    let a = comp.handle_map("a".into(), "app".into());
    let b = comp.handle_map("b".into(), "app".into());
    comp.focus(&a);
    let before = comp.toplevel(&b).unwrap().clone();
    log.clear();
    comp.focus(&a);
    assert!(log.snapshot().is_empty());
    assert_eq!(comp.focused(), Some(&a));
    assert_eq!(comp.toplevel(&b).unwrap(), &before);
}

#[test]
fn switching_to_an_empty_workspace_leaves_focus_unset_and_hides_windows() {
    let (mut comp, log) = session(&["main", "web"]);
    let a = comp.handle_map("a".into(), "app".into());
    log.clear();
    execute(&mut comp, "workspace switch web");
    assert_eq!(comp.active_workspace(), "web");
    let calls = log.snapshot();
    assert!(calls.contains(&BackendCall::SetVisible(a, false)));
    assert!(!calls
        .iter()
        .any(|c| matches!(c, BackendCall::SetVisible(_, true))));
}

#[test]
fn workspace_list_round_trip() {
    let (mut comp, _log) = session(&["1", "2", "3"]);
    let payload = execute(&mut comp, "workspace list");
    let entries: Vec<serde_json::Value> = serde_json::from_str(&payload).unwrap();
    assert_eq!(entries.len(), 3);
    let names: Vec<&str> = entries.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["1", "2", "3"]);
    let active: Vec<bool> = entries.iter().map(|e| e["active"].as_bool().unwrap()).collect();
    assert_eq!(active.iter().filter(|a| **a).count(), 1);
    assert!(active[0]);
}

#[test]
fn switch_to_unknown_window_keeps_workspace_and_focus() {
    let (mut comp, _log) = session(&["main", "web"]);
    let a = comp.handle_map("a".into(), "app".into());
    let payload = execute(&mut comp, "window switch ffffffff");
    assert!(payload.contains("ffffffff"));
    assert!(payload.contains("error"));
    assert_eq!(comp.active_workspace(), "main");
    assert_eq!(comp.focused(), Some(&a));
}

#[test]
fn moving_the_only_window_empties_the_source_workspace() {
    let (mut comp, _log) = session(&["a", "b"]);
    let id = comp.handle_map("lonely".into(), "app".into());

    let payload = execute(&mut comp, &format!("window move-to b {id}"));
    assert!(payload.contains("success"), "{payload}");

    // Workspace a is now empty: window list still reports the window on b.
    let list = execute(&mut comp, "window list");
    assert!(list.contains(r#""workspace":"b""#));

    execute(&mut comp, "workspace switch b");
    assert_eq!(
        comp.toplevel(&id).unwrap().geometry,
        Rect::new(0, 0, 1920, 1080)
    );
}

#[test]
fn unmap_after_kill_request_completes_the_close() {
    let (mut comp, log) = session(&["main"]);
    let a = comp.handle_map("a".into(), "app".into());
    let b = comp.handle_map("b".into(), "app".into());

    execute(&mut comp, &format!("window kill {b}"));
    assert!(log.snapshot().contains(&BackendCall::RequestClose(b.clone())));
    assert_eq!(comp.window_count(), 2);

    // The client acknowledges by unmapping.
    comp.handle_unmap(&b);
    assert_eq!(comp.window_count(), 1);
    assert_eq!(comp.focused(), Some(&a));
    assert_eq!(
        comp.toplevel(&a).unwrap().geometry,
        Rect::new(0, 0, 1920, 1080)
    );
}

#[test]
fn mtoggle_distinguishes_creation_master_from_focus_master() {
    let (mut comp, _log) = session(&["main"]);
    let a = comp.handle_map("a".into(), "app".into());
    let b = comp.handle_map("b".into(), "app".into());
    let c = comp.handle_map("c".into(), "app".into());

    // c is master by creation and by focus: promote the next focused (b).
    execute(&mut comp, "window mtoggle");
    assert_eq!(comp.toplevel(&b).unwrap().geometry.x, 0);
    assert_eq!(comp.toplevel(&b).unwrap().geometry.width, 960);
    assert_eq!(comp.toplevel(&b).unwrap().geometry.height, 1080);

    // Focus a: now focus-first (a) and creation-first (b) disagree, so
    // mtoggle promotes the focused window itself.
    comp.focus(&a);
    execute(&mut comp, "window mtoggle");
    assert_eq!(comp.toplevel(&a).unwrap().geometry, Rect::new(0, 0, 960, 1080));
    let _ = c;
}
