//! Logging setup.
//!
//! The terminal runs in raw alternate-screen mode, so log output goes to a
//! file instead of stderr. `SPEX_LOG` overrides the severity threshold
//! (standard env-filter syntax); the passed default applies otherwise.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub(crate) const LOG_ENV_VAR: &str = "SPEX_LOG";

/// Installs the global subscriber writing to `log_path`. Safe to call more
/// than once; later calls are ignored (matters for tests).
pub(crate) fn init(log_path: &Path, default_level: &str) -> io::Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_the_log_file_and_tolerates_reinit() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("logs").join("spex.log");

        init(&path, "info").expect("first init");
        init(&path, "debug").expect("second init is a no-op");
        assert!(path.exists());
    }
}
