//! The single application snapshot.
//!
//! Every interaction produces a fresh `AppState` from the previous one; no
//! code mutates a snapshot in place once the controller holds it. `Clone`
//! gives the full structural copy the reducers rely on (`Vec`/`String`
//! clones share nothing with the original).

use std::path::PathBuf;

use crate::config::DisplayConfig;
use crate::fsgate::{FileSystemGateway, GatewayError};

pub(crate) const APP_TITLE: &str = "Spex File Browser";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Browse,
    Command,
    Quit,
}

/// List geometry and scroll position.
///
/// `scroll_top` is the index of the child occupying the first visible row.
/// Invariant: `scroll_top <= max(0, children.len() - list_size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScrollData {
    pub(crate) list_size: usize,
    pub(crate) list_width: u16,
    pub(crate) scroll_trigger: usize,
    pub(crate) scroll_top: usize,
}

/// Display prefixes for the two input modes. Set once at init, copied
/// verbatim into every subsequent snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PromptData {
    pub(crate) cmd_prompt: String,
    pub(crate) brs_prompt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AppState {
    /// Absolute path of the directory being viewed. Always a directory that
    /// was readable at the time it was set.
    pub(crate) directory: PathBuf,
    /// Entry names in gateway order. The order is render-significant: it
    /// defines list rows and selection indices.
    pub(crate) children: Vec<String>,
    /// Selected entries, by name. Invariant: every name occurs in `children`.
    pub(crate) selected: Vec<String>,
    pub(crate) scroll: ScrollData,
    pub(crate) prompts: PromptData,
    pub(crate) mode: Mode,
    /// The status/command line, prefixed by the prompt matching `mode`.
    pub(crate) text: String,
}

impl AppState {
    /// Builds the startup snapshot from a real directory: children listed,
    /// first child selected (none if empty), scroll at the top, browse mode
    /// showing the application title.
    ///
    /// There is no error path here: if the directory cannot be listed the
    /// application cannot start, and the gateway error propagates out.
    pub(crate) fn initial<G: FileSystemGateway + ?Sized>(
        gateway: &G,
        directory: PathBuf,
        config: &DisplayConfig,
    ) -> Result<Self, GatewayError> {
        let children = gateway.list_children(&directory)?;
        let selected = children.first().cloned().into_iter().collect();
        Ok(Self {
            directory,
            children,
            selected,
            scroll: ScrollData {
                list_size: config.list_size,
                list_width: config.list_width,
                scroll_trigger: config.scroll_trigger,
                scroll_top: 0,
            },
            prompts: PromptData {
                cmd_prompt: config.cmd_prompt.clone(),
                brs_prompt: config.brs_prompt.clone(),
            },
            mode: Mode::Browse,
            text: format!("{}{}", config.brs_prompt, APP_TITLE),
        })
    }

    /// Index of the active selection (the last selected name) in `children`.
    pub(crate) fn active_index(&self) -> Option<usize> {
        let name = self.selected.last()?;
        self.children.iter().position(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsgate::RealFs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn initial_state_selects_first_child() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("a.txt"), "").expect("write");
        fs::write(tmp.path().join("b.txt"), "").expect("write");

        let config = DisplayConfig::default();
        let state = AppState::initial(&RealFs, tmp.path().to_path_buf(), &config)
            .expect("initial state");

        assert_eq!(state.directory, tmp.path());
        assert_eq!(state.children, vec!["a.txt", "b.txt"]);
        assert_eq!(state.selected, vec!["a.txt"]);
        assert_eq!(state.scroll.scroll_top, 0);
        assert_eq!(state.mode, Mode::Browse);
        assert_eq!(state.text, "(Browse) Spex File Browser");
    }

    #[test]
    fn initial_state_of_empty_directory_has_no_selection() {
        let tmp = tempdir().expect("tempdir");
        let config = DisplayConfig::default();
        let state = AppState::initial(&RealFs, tmp.path().to_path_buf(), &config)
            .expect("initial state");

        assert!(state.children.is_empty());
        assert!(state.selected.is_empty());
    }

    #[test]
    fn initial_state_of_missing_directory_fails() {
        let tmp = tempdir().expect("tempdir");
        let gone = tmp.path().join("missing");
        let config = DisplayConfig::default();
        assert!(AppState::initial(&RealFs, gone, &config).is_err());
    }

    #[test]
    fn active_index_tracks_last_selected_name() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("a"), "").expect("write");
        fs::write(tmp.path().join("b"), "").expect("write");
        fs::write(tmp.path().join("c"), "").expect("write");

        let config = DisplayConfig::default();
        let mut state = AppState::initial(&RealFs, tmp.path().to_path_buf(), &config)
            .expect("initial state");
        state.selected = vec!["a".to_string(), "c".to_string()];
        assert_eq!(state.active_index(), Some(2));

        state.selected.clear();
        assert_eq!(state.active_index(), None);
    }
}
