//! Search-path composition.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use xcrun_sdk::layout::bin_dir;

use crate::bundles::Bundles;
use crate::context::Selection;
use crate::error::Result;

/// Ordered list of directories probed for a tool, first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath(Vec<PathBuf>);

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        SearchPath(dirs)
    }

    /// Split a colon-joined list, skipping empty entries.
    pub fn parse(joined: &str) -> Self {
        SearchPath(
            joined
                .split(':')
                .filter(|entry| !entry.is_empty())
                .map(PathBuf::from)
                .collect(),
        )
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    fn push(&mut self, dir: PathBuf) {
        self.0.push(dir);
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, dir) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{}", dir.display())?;
        }
        Ok(())
    }
}

/// Build the tool search path for the selections in `bundles`.
///
/// The developer `usr/bin` always comes first. An explicitly named SDK adds
/// its own `usr/bin` and that of the toolchain it names; otherwise an
/// explicitly named toolchain adds only its `usr/bin`. Absolute overrides
/// add their own `usr/bin`, and an SDK override with a descriptor also adds
/// its toolchain and ends the search there. With nothing explicit, the
/// implicit SDK and toolchain each contribute.
pub fn search_path(bundles: &Bundles<'_>) -> Result<SearchPath> {
    let ctx = bundles.context();
    let mut path = SearchPath::default();
    path.push(ctx.developer_dir().bin_dir());

    match (ctx.sdk(), ctx.toolchain()) {
        (Selection::Named(_), _) => {
            path.push(bin_dir(bundles.sdk_dir()?));
            path.push(bin_dir(bundles.sdk_toolchain_dir()?));
        }
        (Selection::Implicit(_), Selection::Implicit(_)) => {
            path.push(bin_dir(bundles.sdk_dir()?));
            path.push(bin_dir(bundles.toolchain_dir()?));
        }
        (_, Selection::Named(_)) => {
            path.push(bin_dir(bundles.toolchain_dir()?));
        }
        (sdk, toolchain) => {
            if let Some(sdk_dir) = sdk.path_override() {
                path.push(bin_dir(sdk_dir));
                if bundles.sdk_descriptor()?.is_some() {
                    path.push(bin_dir(bundles.sdk_toolchain_dir()?));
                    debug!(%path, "composed search path");
                    return Ok(path);
                }
            }
            if let Some(toolchain_dir) = toolchain.path_override() {
                path.push(bin_dir(toolchain_dir));
            }
        }
    }

    debug!(%path, "composed search path");
    Ok(path)
}
