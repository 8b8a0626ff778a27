//! Browse-mode keybindings.
//!
//! Command-mode editing keys (characters, Backspace, Enter, Esc) are fixed;
//! only the browse-mode navigation actions are remappable, via
//! `spex/keybinds.json` in the config directory. File format: a map from
//! action name to a key string or list of key strings, e.g.
//! `{"select_next": ["down", "j"], "ascend": "shift+up"}`.

use std::collections::HashMap;
use std::fs;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum KeyAction {
    SelectPrev,
    SelectNext,
    Ascend,
    Descend,
    CommandMode,
}

impl KeyAction {
    pub(crate) fn all() -> &'static [KeyAction] {
        &[
            KeyAction::SelectPrev,
            KeyAction::SelectNext,
            KeyAction::Ascend,
            KeyAction::Descend,
            KeyAction::CommandMode,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyBind {
    pub(crate) modifiers: KeyModifiers,
    pub(crate) code: KeyCode,
}

impl KeyBind {
    /// Parses strings like `"down"`, `"shift+up"`, `":"`.
    pub(crate) fn parse(s: &str) -> Option<KeyBind> {
        let parts: Vec<&str> = s.split('+').collect();
        if parts.is_empty() || parts.last()?.is_empty() {
            return None;
        }
        let mut modifiers = KeyModifiers::NONE;
        for &part in &parts[..parts.len() - 1] {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return None,
            }
        }
        let key = parts.last()?.to_ascii_lowercase();
        let code = match key.as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            " " | "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(KeyBind { modifiers, code })
    }

    /// Whether this binding matches an incoming key event. For character
    /// keys SHIFT is ignored: a shifted `:` still arrives as `Char(':')` and
    /// must match a plain `":"` binding.
    pub(crate) fn matches(&self, key: &KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        let mask = match self.code {
            KeyCode::Char(_) => KeyModifiers::all() & !KeyModifiers::SHIFT,
            _ => KeyModifiers::all(),
        };
        (key.modifiers & mask) == (self.modifiers & mask)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct KeyBindings {
    map: HashMap<KeyAction, Vec<KeyBind>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        let defaults: &[(KeyAction, &[&str])] = &[
            (KeyAction::SelectPrev, &["up", "k"]),
            (KeyAction::SelectNext, &["down", "j"]),
            (KeyAction::Ascend, &["shift+up", "h"]),
            (KeyAction::Descend, &["shift+down", "l"]),
            (KeyAction::CommandMode, &[":"]),
        ];
        for &(action, binds) in defaults {
            map.insert(
                action,
                binds.iter().filter_map(|s| KeyBind::parse(s)).collect(),
            );
        }
        Self { map }
    }
}

impl KeyBindings {
    pub(crate) fn lookup(&self, key: &KeyEvent) -> Option<KeyAction> {
        for &action in KeyAction::all() {
            if let Some(binds) = self.map.get(&action)
                && binds.iter().any(|b| b.matches(key))
            {
                return Some(action);
            }
        }
        None
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SingleOrVec {
    Single(String),
    Multiple(Vec<String>),
}

fn apply_overrides(kb: &mut KeyBindings, overrides: HashMap<String, SingleOrVec>) {
    for (action_name, val) in overrides {
        let parsed = serde_json::from_value::<KeyAction>(serde_json::Value::String(
            action_name.clone(),
        ));
        let Ok(action) = parsed else {
            warn!(action = %action_name, "unknown key action in keybinds file");
            continue;
        };
        let strings = match val {
            SingleOrVec::Single(s) => vec![s],
            SingleOrVec::Multiple(v) => v,
        };
        let mut binds = Vec::new();
        for s in strings {
            match KeyBind::parse(&s) {
                Some(bind) => binds.push(bind),
                None => warn!(action = %action_name, bind = %s, "invalid keybind, skipped"),
            }
        }
        kb.map.insert(action, binds);
    }
}

/// Defaults plus any overrides from the keybinds file. Never fatal: bad
/// entries are skipped with a warning, an unreadable file means defaults.
pub(crate) fn load_keybindings() -> KeyBindings {
    let mut kb = KeyBindings::default();
    let Some(path) = config::config_file_path()
        .and_then(|p| p.parent().map(|d| d.join("keybinds.json")))
    else {
        return kb;
    };
    let Ok(raw) = fs::read_to_string(&path) else {
        return kb;
    };
    match serde_json::from_str::<HashMap<String, SingleOrVec>>(&raw) {
        Ok(overrides) => apply_overrides(&mut kb, overrides),
        Err(err) => warn!(path = %path.display(), %err, "malformed keybinds file, using defaults"),
    }
    kb
}
