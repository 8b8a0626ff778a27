//! Compound reducers, one per logical input event.
//!
//! Each function expresses the whole policy for its event by composing the
//! primitives in [`super::basic`] with the filesystem gateway. All of them
//! are total over valid states: when an event does not apply to the current
//! mode they fall back to `same_state` instead of failing. Only the two
//! directory moves are fallible, and their errors are handled by the
//! controller (previous state kept, error surfaced in the status line).

use tracing::info;

use super::basic;
use crate::fsgate::{FileSystemGateway, GatewayError};
use crate::state::{AppState, Mode};

pub(crate) const DEFAULT_MESSAGE: &str = crate::state::APP_TITLE;

/// Backspace. In command mode with user-typed content, deletes the last
/// character; on the bare command prompt, demotes back to browse mode.
/// No-op elsewhere.
pub(crate) fn backspace(state: &AppState) -> AppState {
    if state.mode != Mode::Command {
        return basic::same_state(state);
    }
    if state.text == state.prompts.cmd_prompt || state.text.is_empty() {
        return basic::set_mode_to_browse(state, DEFAULT_MESSAGE);
    }
    basic::delete_text(state)
}

/// A typed character: appended to the command line in command mode, ignored
/// in browse mode (navigation characters are routed through the keybinding
/// table before reaching here).
pub(crate) fn insert_char(state: &AppState, ch: char) -> AppState {
    if state.mode != Mode::Command {
        return basic::same_state(state);
    }
    basic::add_text(state, ch)
}

/// Up arrow: move the active selection one row up, clamped at the first
/// child (no wraparound), scrolling when the selection crosses the trigger
/// margin. Requires browse mode and a non-empty selection.
pub(crate) fn select_prev(state: &AppState) -> AppState {
    if state.mode != Mode::Browse {
        return basic::same_state(state);
    }
    let Some(index) = state.active_index() else {
        return basic::same_state(state);
    };
    let new_index = index.saturating_sub(1);
    let mut next = basic::move_selection(state, &[new_index]);
    let window_pos = new_index as isize - next.scroll.scroll_top as isize;
    if window_pos < next.scroll.scroll_trigger as isize - 1 {
        next = basic::move_scroll_up(&next);
    }
    basic::set_mode_to_browse(&next, "moved selection up")
}

/// Down arrow: mirror of [`select_prev`], clamped at the last child.
pub(crate) fn select_next(state: &AppState) -> AppState {
    if state.mode != Mode::Browse {
        return basic::same_state(state);
    }
    let Some(index) = state.active_index() else {
        return basic::same_state(state);
    };
    let last = state.children.len() - 1;
    let new_index = (index + 1).min(last);
    let mut next = basic::move_selection(state, &[new_index]);
    let window_pos = new_index as isize - next.scroll.scroll_top as isize;
    if window_pos >= next.scroll.list_size as isize - next.scroll.scroll_trigger as isize {
        next = basic::move_scroll_down(&next);
    }
    basic::set_mode_to_browse(&next, "moved selection down")
}

/// Shift+Up: navigate to the parent directory. Browse mode only.
pub(crate) fn ascend<G: FileSystemGateway + ?Sized>(
    state: &AppState,
    gateway: &G,
) -> Result<AppState, GatewayError> {
    if state.mode != Mode::Browse {
        return Ok(basic::same_state(state));
    }
    let parent = gateway.parent_of(&state.directory);
    info!(from = %state.directory.display(), to = %parent.display(), "ascending");
    let next = enter_directory(state, gateway, &parent)?;
    Ok(basic::set_mode_to_browse(&next, "moved up a directory"))
}

/// Shift+Down: descend into the selected entry when it is openable. Browse
/// mode only; with no selection it is a pure no-op, and on a non-directory
/// selection only the status line changes.
pub(crate) fn descend<G: FileSystemGateway + ?Sized>(
    state: &AppState,
    gateway: &G,
) -> Result<AppState, GatewayError> {
    if state.mode != Mode::Browse {
        return Ok(basic::same_state(state));
    }
    let Some(name) = state.selected.last() else {
        return Ok(basic::same_state(state));
    };
    let target = gateway.join_child(&state.directory, name);
    if !gateway.is_openable(&target) {
        return Ok(basic::set_mode_to_browse(
            state,
            "selected entry is not a directory",
        ));
    }
    info!(to = %target.display(), "descending");
    let next = enter_directory(state, gateway, &target)?;
    Ok(basic::set_mode_to_browse(&next, "moved down a directory"))
}

/// Shared move policy: list the new directory, select its first child and
/// keep it visible, or reset the scroll when the directory is empty.
fn enter_directory<G: FileSystemGateway + ?Sized>(
    state: &AppState,
    gateway: &G,
    dir: &std::path::Path,
) -> Result<AppState, GatewayError> {
    let next = basic::move_dir(state, gateway, dir)?;
    if next.children.is_empty() {
        return Ok(basic::set_scroll_default(&next));
    }
    let next = basic::move_selection(&next, &[0]);
    Ok(basic::move_scroll_up(&next))
}

/// Return key: interpret the command line. Only `quit` leaves browse mode
/// behind; every other command returns to browse regardless of outcome.
pub(crate) fn submit<G: FileSystemGateway + ?Sized>(state: &AppState, gateway: &G) -> AppState {
    if state.mode != Mode::Command {
        return basic::same_state(state);
    }
    let line = state
        .text
        .strip_prefix(state.prompts.cmd_prompt.as_str())
        .unwrap_or(&state.text)
        .trim()
        .to_string();
    let mut words = line.split_whitespace();
    match words.next() {
        None => basic::set_mode_to_browse(state, DEFAULT_MESSAGE),
        Some("quit") | Some("q") => basic::quit(state),
        Some("open") => {
            let program = words.next().unwrap_or("xdg-open").to_string();
            let mut command_line = program.clone();
            for extra in words {
                command_line.push(' ');
                command_line.push_str(extra);
            }
            if let Some(name) = state.selected.last() {
                let target = gateway.join_child(&state.directory, name);
                command_line.push(' ');
                command_line.push_str(&target.to_string_lossy());
            }
            info!(%command_line, "running open command");
            gateway.run_detached(&command_line);
            basic::set_mode_to_browse(state, &format!("opened with {program}"))
        }
        Some(other) => {
            basic::set_mode_to_browse(state, &format!("unrecognized command: {other}"))
        }
    }
}

/// Colon: switch browse mode to command mode with an empty command line.
pub(crate) fn enter_command_mode(state: &AppState) -> AppState {
    if state.mode != Mode::Browse {
        return basic::same_state(state);
    }
    basic::set_mode_to_command(state, "")
}

/// Escape: back to browse mode with the default message, discarding any
/// in-progress command text.
pub(crate) fn escape(state: &AppState) -> AppState {
    basic::set_mode_to_browse(state, DEFAULT_MESSAGE)
}

/// Mouse click on a list row: routes the view's selection change through the
/// model so the mouse can never alter `selected` behind the state's back.
/// Clicks outside the populated rows behave like escape.
pub(crate) fn mouse_select(state: &AppState, index: usize) -> AppState {
    if state.mode != Mode::Browse || index >= state.children.len() {
        return escape(state);
    }
    let next = basic::move_selection(state, &[index]);
    basic::set_mode_to_browse(&next, DEFAULT_MESSAGE)
}
