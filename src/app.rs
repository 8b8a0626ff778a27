//! The controller: owns the single current-state cell and maps raw input
//! events to compound reducers.
//!
//! Every event runs exactly one `reduce` producing the next snapshot; the
//! event loop renders afterwards. When a fallible reducer hits a gateway
//! error (directory vanished, permissions revoked) the previous state is
//! kept and the error is surfaced in the status line.

use std::path::PathBuf;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::{debug, warn};

use crate::config::DisplayConfig;
use crate::fsgate::{FileSystemGateway, GatewayError, RealFs};
use crate::keybinds::{KeyAction, KeyBindings, load_keybindings};
use crate::reducer::{basic, keybind};
use crate::state::{AppState, Mode};
use crate::util::inside;

pub(crate) struct App<G: FileSystemGateway> {
    pub(crate) state: AppState,
    pub(crate) gateway: G,
    pub(crate) keybinds: KeyBindings,
    /// Inner area of the list rows, recorded by the renderer for mouse
    /// hit-testing.
    pub(crate) list_rect: Rect,
}

impl App<RealFs> {
    pub(crate) fn new(directory: PathBuf, config: &DisplayConfig) -> Result<Self, GatewayError> {
        let mut app = Self::with_gateway(RealFs, directory, config)?;
        app.keybinds = load_keybindings();
        Ok(app)
    }
}

impl<G: FileSystemGateway> App<G> {
    pub(crate) fn with_gateway(
        gateway: G,
        directory: PathBuf,
        config: &DisplayConfig,
    ) -> Result<Self, GatewayError> {
        let state = AppState::initial(&gateway, directory, config)?;
        Ok(Self {
            state,
            gateway,
            keybinds: KeyBindings::default(),
            list_rect: Rect::default(),
        })
    }

    pub(crate) fn quit_requested(&self) -> bool {
        self.state.mode == Mode::Quit
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.state = self.reduce_key(&key);
    }

    /// The full key policy: command-mode editing keys are fixed, Esc applies
    /// everywhere, everything else goes through the keybinding table. The
    /// compound reducers themselves re-check the mode, so mis-routed events
    /// degrade to `same_state`.
    fn reduce_key(&self, key: &KeyEvent) -> AppState {
        let state = &self.state;
        if key.code == KeyCode::Esc {
            return keybind::escape(state);
        }
        if state.mode == Mode::Command {
            return match key.code {
                KeyCode::Char(c) => keybind::insert_char(state, c),
                KeyCode::Backspace => keybind::backspace(state),
                KeyCode::Enter => keybind::submit(state, &self.gateway),
                _ => basic::same_state(state),
            };
        }
        match self.keybinds.lookup(key) {
            Some(KeyAction::SelectPrev) => keybind::select_prev(state),
            Some(KeyAction::SelectNext) => keybind::select_next(state),
            Some(KeyAction::Ascend) => self.recover(keybind::ascend(state, &self.gateway)),
            Some(KeyAction::Descend) => self.recover(keybind::descend(state, &self.gateway)),
            Some(KeyAction::CommandMode) => keybind::enter_command_mode(state),
            None => {
                debug!(code = ?key.code, "unbound key");
                basic::same_state(state)
            }
        }
    }

    /// Recovery policy for gateway failures: keep the previous state, show
    /// the error in the status line.
    fn recover(&self, result: Result<AppState, GatewayError>) -> AppState {
        match result {
            Ok(next) => next,
            Err(err) => {
                warn!(%err, "gateway error, keeping previous state");
                basic::set_mode_to_browse(&self.state, &format!("error: {err}"))
            }
        }
    }

    /// Mouse selection goes through the model like every other event; a
    /// click outside the list rows falls back to the escape policy.
    pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        self.state = if inside(self.list_rect, mouse.column, mouse.row) {
            let row = (mouse.row - self.list_rect.y) as usize;
            keybind::mouse_select(&self.state, self.state.scroll.scroll_top + row)
        } else {
            keybind::escape(&self.state)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use std::fs;
    use tempfile::tempdir;

    fn press(modifiers: KeyModifiers, code: KeyCode) -> KeyEvent {
        let mut ev = KeyEvent::new(code, modifiers);
        ev.kind = KeyEventKind::Press;
        ev
    }

    fn app_in(dir: &std::path::Path) -> App<RealFs> {
        App::with_gateway(RealFs, dir.to_path_buf(), &DisplayConfig::default())
            .expect("app should initialize")
    }

    #[test]
    fn key_release_events_are_ignored() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("a"), "").expect("write");
        let mut app = app_in(tmp.path());

        let before = app.state.clone();
        let mut release = press(KeyModifiers::NONE, KeyCode::Down);
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert_eq!(app.state, before);
    }

    #[test]
    fn colon_then_typed_text_then_enter_runs_the_command() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("a"), "").expect("write");
        let mut app = app_in(tmp.path());

        app.handle_key(press(KeyModifiers::NONE, KeyCode::Char(':')));
        assert_eq!(app.state.mode, Mode::Command);
        for c in "quit".chars() {
            app.handle_key(press(KeyModifiers::NONE, KeyCode::Char(c)));
        }
        assert_eq!(app.state.text, "(Command):quit");
        app.handle_key(press(KeyModifiers::NONE, KeyCode::Enter));
        assert!(app.quit_requested());
    }

    #[test]
    fn navigation_keys_drive_the_selection() {
        let tmp = tempdir().expect("tempdir");
        for name in ["a", "b", "c"] {
            fs::write(tmp.path().join(name), "").expect("write");
        }
        let mut app = app_in(tmp.path());
        assert_eq!(app.state.selected, vec!["a"]);

        app.handle_key(press(KeyModifiers::NONE, KeyCode::Down));
        assert_eq!(app.state.selected, vec!["b"]);
        app.handle_key(press(KeyModifiers::NONE, KeyCode::Char('j')));
        assert_eq!(app.state.selected, vec!["c"]);
        app.handle_key(press(KeyModifiers::NONE, KeyCode::Up));
        assert_eq!(app.state.selected, vec!["b"]);
    }

    #[test]
    fn descend_into_vanished_directory_keeps_previous_state() {
        let tmp = tempdir().expect("tempdir");
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).expect("mkdir");
        let mut app = app_in(tmp.path());
        assert_eq!(app.state.selected, vec!["sub"]);

        // The directory disappears between listing and descending.
        fs::remove_dir(&sub).expect("rmdir");
        let before_dir = app.state.directory.clone();
        app.handle_key(press(KeyModifiers::SHIFT, KeyCode::Down));
        assert_eq!(app.state.directory, before_dir);
        assert_eq!(app.state.mode, Mode::Browse);
    }

    #[test]
    fn gateway_errors_surface_in_the_status_line() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("a"), "").expect("write");
        let app = app_in(tmp.path());

        let err = GatewayError::NotFound(tmp.path().join("gone"));
        let next = app.recover(Err(err));
        assert_eq!(next.directory, app.state.directory);
        assert_eq!(next.children, app.state.children);
        assert_eq!(next.mode, Mode::Browse);
        assert!(next.text.contains("error: no such directory"));
    }

    #[test]
    fn mouse_click_selects_the_clicked_row() {
        let tmp = tempdir().expect("tempdir");
        for name in ["a", "b", "c"] {
            fs::write(tmp.path().join(name), "").expect("write");
        }
        let mut app = app_in(tmp.path());
        app.list_rect = Rect::new(1, 2, 50, 10);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.state.selected, vec!["c"]);
    }

    #[test]
    fn invariants_hold_across_arbitrary_key_sequences() {
        let tmp = tempdir().expect("tempdir");
        let sub = tmp.path().join("nested");
        fs::create_dir(&sub).expect("mkdir");
        for i in 0..30 {
            fs::write(tmp.path().join(format!("file{i:02}")), "").expect("write");
        }
        let config = DisplayConfig {
            list_size: 8,
            scroll_trigger: 2,
            ..DisplayConfig::default()
        };
        let mut app = App::with_gateway(RealFs, tmp.path().to_path_buf(), &config)
            .expect("app should initialize");

        let script = [
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::SHIFT, KeyCode::Down),
            press(KeyModifiers::SHIFT, KeyCode::Up),
            press(KeyModifiers::NONE, KeyCode::Char(':')),
            press(KeyModifiers::NONE, KeyCode::Char('x')),
            press(KeyModifiers::NONE, KeyCode::Backspace),
            press(KeyModifiers::NONE, KeyCode::Backspace),
            press(KeyModifiers::NONE, KeyCode::Up),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Down),
            press(KeyModifiers::NONE, KeyCode::Esc),
        ];
        for key in script {
            app.handle_key(key);
            let state = &app.state;
            assert!(
                state.selected.iter().all(|s| state.children.contains(s)),
                "selected must stay a subset of children"
            );
            let max_top = state.children.len().saturating_sub(state.scroll.list_size);
            assert!(
                state.scroll.scroll_top <= max_top,
                "scroll_top {} exceeds {}",
                state.scroll.scroll_top,
                max_top
            );
        }
    }

    #[test]
    fn mouse_click_outside_the_list_applies_the_escape_policy() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("a"), "").expect("write");
        let mut app = app_in(tmp.path());
        app.list_rect = Rect::new(1, 2, 50, 10);
        app.handle_key(press(KeyModifiers::NONE, KeyCode::Char(':')));
        assert_eq!(app.state.mode, Mode::Command);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 90,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.state.mode, Mode::Browse);
        assert_eq!(app.state.text, "(Browse) Spex File Browser");
    }
}
