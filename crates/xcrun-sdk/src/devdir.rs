//! Active developer directory discovery.

use std::path::Path;

use tracing::debug;

use crate::config::{vars, DEVELOPER_DIR_CACHE};
use crate::environ::Environ;
use crate::error::{Result, SdkError};
use crate::layout::DeveloperDir;

/// Determine the active developer directory.
///
/// `DEVELOPER_DIR` wins and is used verbatim unless it is empty. Otherwise
/// the path cached in `$HOME/.xcdev.dat` is used, minus any trailing line
/// terminator.
pub fn resolve_developer_dir(env: &Environ) -> Result<DeveloperDir> {
    debug!("attempting to retrieve developer path from {}", vars::DEVELOPER_DIR);
    if let Some(dir) = env.get_os(vars::DEVELOPER_DIR) {
        if dir.is_empty() {
            return Err(SdkError::ConfigurationMissing {
                detail: format!("{} is set but empty", vars::DEVELOPER_DIR),
            });
        }
        debug!(path = %Path::new(dir).display(), "using developer path from {}", vars::DEVELOPER_DIR);
        return Ok(DeveloperDir::new(dir));
    }

    debug!("attempting to retrieve developer path from configuration cache");
    let home = env.get_os(vars::HOME).ok_or_else(|| SdkError::ConfigurationMissing {
        detail: format!("{} is not set and {} is not set", vars::DEVELOPER_DIR, vars::HOME),
    })?;
    let cache = Path::new(home).join(DEVELOPER_DIR_CACHE);
    let dir = read_cache(&cache)?;
    debug!(path = %dir, cache = %cache.display(), "using developer path from configuration cache");
    Ok(DeveloperDir::new(dir))
}

fn read_cache(cache: &Path) -> Result<String> {
    let content = std::fs::read_to_string(cache).map_err(|e| SdkError::ConfigurationMissing {
        detail: format!("unable to read configuration cache '{}' ({e})", cache.display()),
    })?;
    let dir = content.trim_end_matches(['\n', '\r']);
    if dir.is_empty() {
        return Err(SdkError::ConfigurationMissing {
            detail: format!("configuration cache '{}' is empty", cache.display()),
        });
    }
    Ok(dir.to_string())
}
