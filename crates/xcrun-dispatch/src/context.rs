//! Per-invocation resolution state.
//!
//! A [`ContextBuilder`] collects command-line selections, then
//! [`ContextBuilder::resolve`] fills in whatever is still unset from the
//! environment and the default configuration and freezes the result into a
//! [`ResolutionContext`]. Nothing mutates the context after that.

use std::path::{Path, PathBuf};

use tracing::debug;
use xcrun_sdk::config::{vars, DEFAULT_CONFIG_PATH, SDK_EXTENSION, TOOLCHAIN_EXTENSION};
use xcrun_sdk::{
    bundle_name, load_defaults, validate_directory, DefaultConfiguration, DeveloperDir, Environ,
    SdkError,
};

use crate::error::Result;

/// How an SDK or toolchain was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Named on the command line (`--sdk iPhoneOS`).
    Named(String),
    /// Absolute bundle path given on the command line (`--sdk /path/to/X.sdk`).
    Path(PathBuf),
    /// Taken from `SDKROOT`/`TOOLCHAINS` or the default configuration.
    Implicit(String),
}

impl Selection {
    /// Interpret a command-line reference: absolute paths are overrides and
    /// must be existing directories, anything else is a bundle name.
    fn from_reference(reference: &str, extension: &str, kind: &'static str) -> Result<Self> {
        if reference.starts_with('/') {
            let path = PathBuf::from(reference);
            validate_directory(&path, kind)?;
            Ok(Selection::Path(path))
        } else {
            Ok(Selection::Named(bundle_name(reference, extension)))
        }
    }

    /// The bundle name, unless this is a path override.
    pub fn name(&self) -> Option<&str> {
        match self {
            Selection::Named(name) | Selection::Implicit(name) => Some(name),
            Selection::Path(_) => None,
        }
    }

    pub fn path_override(&self) -> Option<&Path> {
        match self {
            Selection::Path(path) => Some(path),
            _ => None,
        }
    }
}

/// Output mode flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputMode {
    /// Log each resolution step.
    pub verbose: bool,
    /// Log the command line before launching.
    pub log: bool,
    /// Print the located path instead of launching.
    pub find: bool,
}

/// Resolved selection state for one invocation.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    developer_dir: DeveloperDir,
    sdk: Selection,
    toolchain: Selection,
    mode: OutputMode,
}

impl ResolutionContext {
    pub fn developer_dir(&self) -> &DeveloperDir {
        &self.developer_dir
    }

    pub fn sdk(&self) -> &Selection {
        &self.sdk
    }

    pub fn toolchain(&self) -> &Selection {
        &self.toolchain
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }
}

/// Single writer for a [`ResolutionContext`].
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    developer_dir: DeveloperDir,
    sdk: Option<Selection>,
    toolchain: Option<Selection>,
    mode: OutputMode,
    defaults_path: PathBuf,
}

impl ContextBuilder {
    pub fn new(developer_dir: DeveloperDir) -> Self {
        ContextBuilder {
            developer_dir,
            sdk: None,
            toolchain: None,
            mode: OutputMode::default(),
            defaults_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Read defaults from `path` instead of `/etc/xcrun.ini`.
    pub fn defaults_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults_path = path.into();
        self
    }

    /// Select an SDK by name or absolute path. A later call replaces an
    /// earlier one.
    pub fn sdk(mut self, reference: &str) -> Result<Self> {
        self.sdk = Some(Selection::from_reference(reference, SDK_EXTENSION, "sdk")?);
        Ok(self)
    }

    /// Select a toolchain by name or absolute path. A later call replaces an
    /// earlier one.
    pub fn toolchain(mut self, reference: &str) -> Result<Self> {
        self.toolchain = Some(Selection::from_reference(
            reference,
            TOOLCHAIN_EXTENSION,
            "toolchain",
        )?);
        Ok(self)
    }

    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fill unset selections and freeze the context.
    ///
    /// An unset SDK comes from the basename of `SDKROOT`, an unset toolchain
    /// from the basename of `TOOLCHAINS`; otherwise both fall back to the
    /// default configuration, which is read at most once.
    pub fn resolve(self, env: &Environ) -> Result<ResolutionContext> {
        let mut defaults: Option<DefaultConfiguration> = None;

        let sdk = match self.sdk {
            Some(selection) => selection,
            None => match env.get(vars::SDKROOT) {
                Some(root) => {
                    debug!(root, "using SDK from {}", vars::SDKROOT);
                    Selection::Implicit(bundle_name(root, SDK_EXTENSION))
                }
                None => Selection::Implicit(default_name(
                    &mut defaults,
                    &self.defaults_path,
                    "sdk",
                    |d| d.sdk.clone(),
                )?),
            },
        };

        let toolchain = match self.toolchain {
            Some(selection) => selection,
            None => match env.get(vars::TOOLCHAINS) {
                Some(list) => {
                    debug!(list, "using toolchain from {}", vars::TOOLCHAINS);
                    Selection::Implicit(bundle_name(list, TOOLCHAIN_EXTENSION))
                }
                None => Selection::Implicit(default_name(
                    &mut defaults,
                    &self.defaults_path,
                    "toolchain",
                    |d| d.toolchain.clone(),
                )?),
            },
        };

        debug!(?sdk, ?toolchain, "resolved selection");
        Ok(ResolutionContext {
            developer_dir: self.developer_dir,
            sdk,
            toolchain,
            mode: self.mode,
        })
    }
}

fn default_name(
    cache: &mut Option<DefaultConfiguration>,
    path: &Path,
    kind: &'static str,
    pick: impl Fn(&DefaultConfiguration) -> Option<String>,
) -> Result<String> {
    let defaults = match cache.take() {
        Some(defaults) => defaults,
        None => load_defaults(path)?,
    };
    let name = pick(&defaults);
    *cache = Some(defaults);

    let name = name.ok_or_else(|| SdkError::MissingDefault {
        kind,
        path: path.to_path_buf(),
    })?;
    debug!(name = %name, kind, "using default from {}", path.display());
    Ok(name)
}
