//! Display configuration and config-directory resolution.
//!
//! `spex/config.json` may override the list geometry and prompts. A missing
//! file means defaults; a malformed one is logged and ignored.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

const CONFIG_FILE_REL: &str = "spex/config.json";
const LOG_FILE_REL: &str = "spex/spex.log";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct DisplayConfig {
    pub(crate) list_size: usize,
    pub(crate) list_width: u16,
    pub(crate) scroll_trigger: usize,
    pub(crate) cmd_prompt: String,
    pub(crate) brs_prompt: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            list_size: 25,
            list_width: 100,
            scroll_trigger: 3,
            cmd_prompt: "(Command):".to_string(),
            brs_prompt: "(Browse) ".to_string(),
        }
    }
}

fn config_base_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg));
    }
    if let Ok(appdata) = std::env::var("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

pub(crate) fn config_file_path() -> Option<PathBuf> {
    config_base_dir().map(|base| base.join(CONFIG_FILE_REL))
}

pub(crate) fn log_file_path() -> Option<PathBuf> {
    config_base_dir().map(|base| base.join(LOG_FILE_REL))
}

pub(crate) fn load_config() -> DisplayConfig {
    let Some(path) = config_file_path() else {
        return DisplayConfig::default();
    };
    let Ok(raw) = fs::read_to_string(&path) else {
        return DisplayConfig::default();
    };
    match serde_json::from_str::<DisplayConfig>(&raw) {
        Ok(config) if config.list_size > 0 && config.list_width > 0 => config,
        Ok(_) => {
            warn!(path = %path.display(), "config has zero list geometry, using defaults");
            DisplayConfig::default()
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed config, using defaults");
            DisplayConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_geometry() {
        let config = DisplayConfig::default();
        assert_eq!(config.list_size, 25);
        assert_eq!(config.list_width, 100);
        assert_eq!(config.scroll_trigger, 3);
        assert_eq!(config.cmd_prompt, "(Command):");
        assert_eq!(config.brs_prompt, "(Browse) ");
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: DisplayConfig =
            serde_json::from_str(r#"{"list_size": 10}"#).expect("parse");
        assert_eq!(config.list_size, 10);
        assert_eq!(config.scroll_trigger, 3);
        assert_eq!(config.brs_prompt, "(Browse) ");
    }
}
