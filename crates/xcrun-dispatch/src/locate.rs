//! Command lookup along a search path.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::search::SearchPath;

/// Whether `path` is a regular file the current user could execute.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Whether `path` is a regular file.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// First `<dir>/<name>` along `search` that is executable.
pub fn locate(name: &str, search: &SearchPath) -> Option<PathBuf> {
    for dir in search.iter() {
        let candidate = dir.join(name);
        debug!(path = %candidate.display(), "probing");
        if is_executable(&candidate) {
            debug!(path = %candidate.display(), "found");
            return Some(candidate);
        }
    }
    None
}
