//! Filesystem access behind a narrow interface.
//!
//! Reducers never touch `std::fs` directly; everything goes through
//! [`FileSystemGateway`] so the policy code stays pure apart from these
//! explicit collaborator calls.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("directory not readable: {path}: {source}")]
    NotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no such directory: {0}")]
    NotFound(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    File,
    Directory,
}

pub(crate) trait FileSystemGateway {
    /// The process working directory, used once at startup.
    fn current_directory(&self) -> Result<PathBuf, GatewayError>;

    /// Names of the entries of `path`, directories first, sorted
    /// case-insensitively within each group. The returned order defines list
    /// rows and selection indices.
    fn list_children(&self, path: &Path) -> Result<Vec<String>, GatewayError>;

    /// Parent directory of `path`; the filesystem root is its own parent.
    fn parent_of(&self, path: &Path) -> PathBuf;

    fn join_child(&self, path: &Path, name: &str) -> PathBuf;

    /// True iff `path` is a directory that can be descended into.
    fn is_openable(&self, path: &Path) -> bool;

    fn classify(&self, path: &Path) -> EntryKind;

    /// Fire-and-forget process spawn for the command-mode `open` action.
    /// Failures are logged and never surfaced back into state.
    fn run_detached(&self, command_line: &str);
}

/// Production gateway over `std::fs`.
pub(crate) struct RealFs;

impl FileSystemGateway for RealFs {
    fn current_directory(&self) -> Result<PathBuf, GatewayError> {
        std::env::current_dir().map_err(|source| GatewayError::NotReadable {
            path: PathBuf::from("."),
            source,
        })
    }

    fn list_children(&self, path: &Path) -> Result<Vec<String>, GatewayError> {
        if !path.exists() {
            return Err(GatewayError::NotFound(path.to_path_buf()));
        }
        let entries = fs::read_dir(path).map_err(|source| GatewayError::NotReadable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut names: Vec<(bool, String)> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.path().is_dir();
                (is_dir, e.file_name().to_string_lossy().to_string())
            })
            .collect();
        names.sort_by_key(|(is_dir, name)| (!is_dir, name.to_ascii_lowercase()));
        debug!(path = %path.display(), count = names.len(), "listed directory");
        Ok(names.into_iter().map(|(_, name)| name).collect())
    }

    fn parent_of(&self, path: &Path) -> PathBuf {
        path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf())
    }

    fn join_child(&self, path: &Path, name: &str) -> PathBuf {
        path.join(name)
    }

    fn is_openable(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn classify(&self, path: &Path) -> EntryKind {
        if path.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    fn run_detached(&self, command_line: &str) {
        let mut parts = command_line.split_whitespace();
        let Some(program) = parts.next() else {
            return;
        };
        let result = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match result {
            Ok(child) => debug!(%command_line, pid = child.id(), "spawned detached command"),
            Err(err) => warn!(%command_line, %err, "failed to spawn detached command"),
        }
    }
}
