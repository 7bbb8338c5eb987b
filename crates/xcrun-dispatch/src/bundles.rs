//! Bundle directories and descriptors for a resolved context.
//!
//! Paths and descriptors are computed on first use and kept for the lifetime
//! of the [`Bundles`] value, so one composition never reads an `info.ini`
//! twice.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use tracing::debug;
use xcrun_sdk::{has_descriptor, load_sdk, load_toolchain, SdkDescriptor, ToolchainDescriptor};

use crate::context::{ResolutionContext, Selection};
use crate::error::Result;

/// Lazily resolved SDK and toolchain bundles.
#[derive(Debug)]
pub struct Bundles<'a> {
    ctx: &'a ResolutionContext,
    sdk_dir: OnceCell<PathBuf>,
    sdk: OnceCell<Option<SdkDescriptor>>,
    sdk_toolchain_dir: OnceCell<PathBuf>,
    toolchain_dir: OnceCell<PathBuf>,
    toolchain: OnceCell<ToolchainDescriptor>,
}

impl<'a> Bundles<'a> {
    pub fn new(ctx: &'a ResolutionContext) -> Self {
        Bundles {
            ctx,
            sdk_dir: OnceCell::new(),
            sdk: OnceCell::new(),
            sdk_toolchain_dir: OnceCell::new(),
            toolchain_dir: OnceCell::new(),
            toolchain: OnceCell::new(),
        }
    }

    pub fn context(&self) -> &'a ResolutionContext {
        self.ctx
    }

    /// Directory of the current SDK.
    pub fn sdk_dir(&self) -> Result<&Path> {
        if let Some(dir) = self.sdk_dir.get() {
            return Ok(dir);
        }
        let dir = match self.ctx.sdk() {
            Selection::Path(path) => path.clone(),
            Selection::Named(name) | Selection::Implicit(name) => {
                self.ctx.developer_dir().sdk_path(name)?
            }
        };
        Ok(self.sdk_dir.get_or_init(|| dir))
    }

    /// Descriptor of the current SDK.
    ///
    /// `None` only for a path override that carries no `info.ini`; any other
    /// missing or broken descriptor is an error.
    pub fn sdk_descriptor(&self) -> Result<Option<&SdkDescriptor>> {
        if let Some(sdk) = self.sdk.get() {
            return Ok(sdk.as_ref());
        }
        let dir = self.sdk_dir()?;
        let sdk = match self.ctx.sdk() {
            Selection::Path(_) if !has_descriptor(dir) => {
                debug!(path = %dir.display(), "sdk override has no descriptor");
                None
            }
            _ => Some(load_sdk(dir)?),
        };
        Ok(self.sdk.get_or_init(|| sdk).as_ref())
    }

    /// Directory of the toolchain named in the current SDK's descriptor,
    /// `<dev>/Toolchains/<name>.toolchain`.
    pub fn sdk_toolchain_dir(&self) -> Result<&Path> {
        if let Some(dir) = self.sdk_toolchain_dir.get() {
            return Ok(dir);
        }
        let sdk_dir = self.sdk_dir()?;
        let bare = SdkDescriptor::default();
        let sdk = self.sdk_descriptor()?.unwrap_or(&bare);
        let name = sdk.toolchain_name(sdk_dir)?;
        let dir = self.ctx.developer_dir().toolchain_path(name)?;
        debug!(path = %dir.display(), "sdk toolchain");
        Ok(self.sdk_toolchain_dir.get_or_init(|| dir))
    }

    /// Directory of the current toolchain: the override path, or the bundle
    /// for the named or implicit toolchain.
    pub fn toolchain_dir(&self) -> Result<&Path> {
        if let Some(dir) = self.toolchain_dir.get() {
            return Ok(dir);
        }
        let dir = match self.ctx.toolchain() {
            Selection::Path(path) => path.clone(),
            Selection::Named(name) | Selection::Implicit(name) => {
                self.ctx.developer_dir().toolchain_path(name)?
            }
        };
        Ok(self.toolchain_dir.get_or_init(|| dir))
    }

    /// Descriptor of the current toolchain.
    pub fn toolchain_descriptor(&self) -> Result<&ToolchainDescriptor> {
        if let Some(tc) = self.toolchain.get() {
            return Ok(tc);
        }
        let tc = load_toolchain(self.toolchain_dir()?)?;
        Ok(self.toolchain.get_or_init(|| tc))
    }
}
