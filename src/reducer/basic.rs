//! Primitive reducers: single-field transitions over [`AppState`].
//!
//! Each function takes the previous snapshot by reference and returns a new,
//! independently owned snapshot. None touches the filesystem except
//! [`move_dir`], which re-lists children through the gateway.

use std::path::Path;

use crate::fsgate::{FileSystemGateway, GatewayError};
use crate::state::{AppState, Mode};

/// Identity transition: a structural copy with no field changes.
pub(crate) fn same_state(state: &AppState) -> AppState {
    state.clone()
}

pub(crate) fn set_mode_to_browse(state: &AppState, message: &str) -> AppState {
    let mut next = state.clone();
    next.mode = Mode::Browse;
    next.text = format!("{}{}", next.prompts.brs_prompt, message);
    next
}

pub(crate) fn set_mode_to_command(state: &AppState, message: &str) -> AppState {
    let mut next = state.clone();
    next.mode = Mode::Command;
    next.text = format!("{}{}", next.prompts.cmd_prompt, message);
    next
}

/// Drops the last character of `text`. Callers guard the empty case.
pub(crate) fn delete_text(state: &AppState) -> AppState {
    debug_assert!(!state.text.is_empty(), "delete_text on empty text");
    let mut next = state.clone();
    next.text.pop();
    next
}

pub(crate) fn add_text(state: &AppState, ch: char) -> AppState {
    let mut next = state.clone();
    next.text.push(ch);
    next
}

/// Moves to `dir`: re-lists children through the gateway and clears the
/// selection. Mode, text and scroll data are left for the caller to fix up.
pub(crate) fn move_dir<G: FileSystemGateway + ?Sized>(
    state: &AppState,
    gateway: &G,
    dir: &Path,
) -> Result<AppState, GatewayError> {
    let children = gateway.list_children(dir)?;
    let mut next = state.clone();
    next.directory = dir.to_path_buf();
    next.children = children;
    next.selected.clear();
    Ok(next)
}

/// Replaces the selection with the children at `indices`, preserving the
/// order of `indices`. Out-of-range indices are skipped.
pub(crate) fn move_selection(state: &AppState, indices: &[usize]) -> AppState {
    let mut next = state.clone();
    next.selected = indices
        .iter()
        .filter_map(|&i| state.children.get(i).cloned())
        .collect();
    next
}

/// Recomputes `scroll_top` so the active selection sits `scroll_trigger`
/// rows above the bottom of the visible window:
/// `scroll_top = clamp(index - list_size + scroll_trigger, 0, n - list_size)`.
/// When all children fit in the window the clamp range collapses and
/// `scroll_top` is forced to 0.
pub(crate) fn move_scroll_down(state: &AppState) -> AppState {
    debug_assert!(!state.selected.is_empty(), "scroll with empty selection");
    let mut next = state.clone();
    if let Some(index) = state.active_index() {
        let raw = index as isize - state.scroll.list_size as isize
            + state.scroll.scroll_trigger as isize;
        next.scroll.scroll_top = clamp_scroll(state, raw);
    }
    next
}

/// Mirror of [`move_scroll_down`] for upward motion:
/// `scroll_top = clamp(index - scroll_trigger + 1, 0, n - list_size)`.
pub(crate) fn move_scroll_up(state: &AppState) -> AppState {
    debug_assert!(!state.selected.is_empty(), "scroll with empty selection");
    let mut next = state.clone();
    if let Some(index) = state.active_index() {
        let raw = index as isize - state.scroll.scroll_trigger as isize + 1;
        next.scroll.scroll_top = clamp_scroll(state, raw);
    }
    next
}

fn clamp_scroll(state: &AppState, raw: isize) -> usize {
    let hi = (state.children.len() as isize - state.scroll.list_size as isize).max(0);
    raw.clamp(0, hi) as usize
}

pub(crate) fn set_scroll_default(state: &AppState) -> AppState {
    let mut next = state.clone();
    next.scroll.scroll_top = 0;
    next
}

pub(crate) fn quit(state: &AppState) -> AppState {
    let mut next = state.clone();
    next.mode = Mode::Quit;
    next
}

/// In-memory state fixture shared by reducer tests.
#[cfg(test)]
pub(crate) fn fixture(children: &[&str], selected: &[&str]) -> AppState {
    use crate::state::{PromptData, ScrollData};
    use std::path::PathBuf;

    AppState {
        directory: PathBuf::from("/fixture"),
        children: children.iter().map(|s| s.to_string()).collect(),
        selected: selected.iter().map(|s| s.to_string()).collect(),
        scroll: ScrollData {
            list_size: 25,
            list_width: 100,
            scroll_trigger: 3,
            scroll_top: 0,
        },
        prompts: PromptData {
            cmd_prompt: "(Command):".to_string(),
            brs_prompt: "(Browse) ".to_string(),
        },
        mode: Mode::Browse,
        text: "(Browse) Spex File Browser".to_string(),
    }
}
