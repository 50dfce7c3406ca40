//! Command dispatcher: ordered verb table and command handlers
//!
//! Token 0 is the verb; entries may also require a sub-verb in token 1.
//! The table is walked in order and the first match wins, so the bare
//! `window`/`workspace` help entries sit after their subcommands. Handlers
//! run inside the compositor event loop and return either a [`Response`]
//! or a recoverable [`TatamiError`], which becomes the `error` payload.

use crate::compositor::Compositor;
use crate::ipc::protocol::{error_payload, tokenize, Response, WindowEntry, WorkspaceEntry};
use crate::models::ToplevelId;
use crate::TatamiError;
use tracing::debug;

type Handler = fn(&mut Compositor, &[&str]) -> Result<Response, TatamiError>;

struct Command {
    verb: &'static str,
    sub: Option<&'static str>,
    run: Handler,
}

const COMMANDS: &[Command] = &[
    Command {
        verb: "exit",
        sub: None,
        run: exit,
    },
    Command {
        verb: "window",
        sub: Some("list"),
        run: window_list,
    },
    Command {
        verb: "window",
        sub: Some("switch"),
        run: window_switch,
    },
    Command {
        verb: "window",
        sub: Some("cycle"),
        run: window_cycle,
    },
    Command {
        verb: "window",
        sub: Some("kill"),
        run: window_kill,
    },
    Command {
        verb: "window",
        sub: Some("move-to"),
        run: window_move_to,
    },
    Command {
        verb: "window",
        sub: Some("mtoggle"),
        run: window_master_toggle,
    },
    Command {
        verb: "window",
        sub: None,
        run: window_help,
    },
    Command {
        verb: "workspace",
        sub: Some("list"),
        run: workspace_list,
    },
    Command {
        verb: "workspace",
        sub: Some("switch"),
        run: workspace_switch,
    },
    Command {
        verb: "workspace",
        sub: None,
        run: workspace_help,
    },
];

/// Tokenize and dispatch one request line; always yields a payload.
pub fn execute(compositor: &mut Compositor, line: &str) -> String {
    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(err) => return error_payload(&err),
    };

    debug!(?tokens, "dispatching command");
    for cmd in COMMANDS {
        if cmd.verb != tokens[0] {
            continue;
        }
        match cmd.sub {
            None => {
                let args = &tokens[1..];
                return run_handler(cmd, compositor, args);
            }
            Some(sub) if tokens.len() > 1 && tokens[1] == sub => {
                let args = &tokens[2..];
                return run_handler(cmd, compositor, args);
            }
            Some(_) => continue,
        }
    }
    error_payload(&TatamiError::UnknownCommand(line.trim().to_string()))
}

fn run_handler(cmd: &Command, compositor: &mut Compositor, args: &[&str]) -> String {
    match (cmd.run)(compositor, args) {
        Ok(response) => response.to_payload(),
        Err(err) => error_payload(&err),
    }
}

fn exit(compositor: &mut Compositor, _args: &[&str]) -> Result<Response, TatamiError> {
    compositor.stop();
    Ok(Response::Success("Exiting tatami".to_string()))
}

fn window_help(_compositor: &mut Compositor, _args: &[&str]) -> Result<Response, TatamiError> {
    Ok(Response::Success(
        "usage: window <list|switch|cycle|kill|move-to|mtoggle>".to_string(),
    ))
}

fn window_list(compositor: &mut Compositor, _args: &[&str]) -> Result<Response, TatamiError> {
    if compositor.registry.is_empty() {
        return Err(TatamiError::NoWindowsOpen);
    }
    let entries = compositor
        .registry
        .iter()
        .map(|t| WindowEntry {
            id: t.id.to_string(),
            app: t.app_id.clone(),
            title: t.title.clone(),
            workspace: t.workspace.clone(),
        })
        .collect();
    Ok(Response::Windows(entries))
}

fn window_switch(compositor: &mut Compositor, args: &[&str]) -> Result<Response, TatamiError> {
    let id = *args.first().ok_or(TatamiError::MissingArgument("window id"))?;
    let toplevel = compositor.registry.lookup(id)?;
    let title = toplevel.title.clone();
    let target = toplevel.id.clone();
    compositor.focus(&target);
    Ok(Response::Success(format!("switching focus to: {title}")))
}

fn window_cycle(compositor: &mut Compositor, _args: &[&str]) -> Result<Response, TatamiError> {
    let active = compositor.active_workspace().to_string();
    match compositor.registry.workspace_len(&active) {
        0 => return Err(TatamiError::WorkspaceEmpty),
        1 => return Err(TatamiError::OnlyOneWindow),
        _ => {}
    }
    // Round-robin: the least recently focused window is next.
    let next = compositor
        .registry
        .last_focused(&active)
        .map(|t| (t.id.clone(), t.title.clone()))
        .ok_or(TatamiError::WorkspaceEmpty)?;
    compositor.focus(&next.0);
    Ok(Response::Success(format!("switching focus to: {}", next.1)))
}

fn window_kill(compositor: &mut Compositor, args: &[&str]) -> Result<Response, TatamiError> {
    let (id, title) = match args.first() {
        Some(id) => {
            let toplevel = compositor.registry.lookup(id)?;
            (toplevel.id.clone(), toplevel.title.clone())
        }
        None => first_focused_in_active(compositor)?,
    };
    compositor.request_close(&id);
    Ok(Response::Success(format!("kill: {title}")))
}

fn window_move_to(compositor: &mut Compositor, args: &[&str]) -> Result<Response, TatamiError> {
    let workspace = *args
        .first()
        .ok_or(TatamiError::MissingArgument("workspace name"))?;
    if compositor.workspaces.find(workspace).is_none() {
        return Err(TatamiError::WorkspaceNotFound(workspace.to_string()));
    }

    let (id, title) = match args.get(1) {
        Some(id) => {
            let toplevel = compositor.registry.lookup(id)?;
            (toplevel.id.clone(), toplevel.title.clone())
        }
        None => first_focused_in_active(compositor).map_err(|_| TatamiError::NoFocusedWindow)?,
    };

    compositor.move_to_workspace(&id, workspace);
    Ok(Response::Success(format!(
        "moved window {title} to workspace {workspace}"
    )))
}

fn window_master_toggle(
    compositor: &mut Compositor,
    args: &[&str],
) -> Result<Response, TatamiError> {
    if let Some(id) = args.first() {
        let toplevel = compositor.registry.lookup(id)?;
        let title = toplevel.title.clone();
        let target = toplevel.id.clone();
        compositor.set_master(&target);
        return Ok(Response::Success(format!("master: {title}")));
    }

    let active = compositor.active_workspace().to_string();
    let focused = compositor
        .registry
        .first_focused(&active)
        .map(|t| (t.id.clone(), t.title.clone()))
        .ok_or(TatamiError::NoWindowFound)?;
    let master = compositor
        .registry
        .first(&active)
        .map(|t| t.id.clone())
        .ok_or(TatamiError::NoWindowFound)?;

    // The focused window can already hold the master slot: first by focus
    // recency and first by creation position are distinct notions and only
    // sometimes agree. When they agree, toggle means "promote the next
    // focused window instead"; when they disagree, promote the focused one.
    let (target, title) = if focused.0 == master {
        compositor
            .registry
            .next_focused(&active)
            .map(|t| (t.id.clone(), t.title.clone()))
            .ok_or(TatamiError::AlreadyMaster)?
    } else {
        focused
    };

    compositor.set_master(&target);
    Ok(Response::Success(format!("master: {title}")))
}

fn workspace_help(_compositor: &mut Compositor, _args: &[&str]) -> Result<Response, TatamiError> {
    Ok(Response::Success(
        "usage: workspace <list|switch>".to_string(),
    ))
}

fn workspace_list(compositor: &mut Compositor, _args: &[&str]) -> Result<Response, TatamiError> {
    if compositor.workspaces.is_empty() {
        return Err(TatamiError::NoWorkspaces);
    }
    let active = compositor.active_workspace().to_string();
    let entries = compositor
        .workspaces
        .iter()
        .map(|ws| WorkspaceEntry {
            name: ws.name.clone(),
            active: ws.name == active,
        })
        .collect();
    Ok(Response::Workspaces(entries))
}

fn workspace_switch(compositor: &mut Compositor, args: &[&str]) -> Result<Response, TatamiError> {
    let name = *args
        .first()
        .ok_or(TatamiError::MissingArgument("workspace name"))?;
    if compositor.active_workspace() == name {
        return Ok(Response::Success(format!("already in workspace {name}")));
    }
    if !compositor.switch_workspace(name) {
        return Err(TatamiError::WorkspaceNotFound(name.to_string()));
    }
    Ok(Response::Success(format!("switch to workspace {name}")))
}

/// Shared fallback for commands that default to the focused window: the
/// first focused toplevel of the active workspace.
fn first_focused_in_active(
    compositor: &Compositor,
) -> Result<(ToplevelId, String), TatamiError> {
    let active = compositor.active_workspace();
    compositor
        .registry
        .first_focused(active)
        .map(|t| (t.id.clone(), t.title.clone()))
        .ok_or(TatamiError::NoWindowFound)
}
