//! Child-process environment.

use std::ffi::{OsStr, OsString};

use tracing::warn;
use xcrun_sdk::config::vars;
use xcrun_sdk::layout::{bin_dir, lib_dir};
use xcrun_sdk::Environ;
use xcrun_targets::{resolve_triple, TARGET_TRIPLE_VAR};

use crate::bundles::Bundles;
use crate::error::Result;

/// The complete environment handed to a launched tool. It replaces the
/// parent environment rather than extending it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildEnvironment {
    vars: Vec<(String, OsString)>,
}

impl ChildEnvironment {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_os(key).and_then(OsStr::to_str)
    }

    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn set(&mut self, key: &str, value: impl Into<OsString>) {
        self.vars.push((key.to_string(), value.into()));
    }
}

/// Build the environment for a tool launched under `bundles`.
///
/// `PATH` and `LD_LIBRARY_PATH` follow the context's toolchain selection,
/// even when a named SDK contributed a different toolchain to the search
/// path.
///
/// A missing target triple or deployment target degrades to a warning and
/// the variable is left out; bundle and descriptor failures are errors.
pub fn compose_environment(bundles: &Bundles<'_>, env: &Environ) -> Result<ChildEnvironment> {
    let ctx = bundles.context();
    let dev = ctx.developer_dir();
    let sdk_dir = bundles.sdk_dir()?;
    let toolchain_dir = bundles.toolchain_dir()?;
    let sdk = bundles.sdk_descriptor()?;
    let sdk_label = ctx
        .sdk()
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| sdk_dir.display().to_string());

    let mut child = ChildEnvironment::default();
    child.set(vars::SDKROOT, sdk_dir);

    let mut path = OsString::from(dev.bin_dir());
    path.push(":");
    path.push(bin_dir(toolchain_dir));
    if let Some(inherited) = env.get_os(vars::PATH) {
        path.push(":");
        path.push(inherited);
    }
    child.set(vars::PATH, path);
    child.set(vars::LD_LIBRARY_PATH, lib_dir(toolchain_dir));

    if let Some(home) = env.get_os(vars::HOME) {
        child.set(vars::HOME, home);
    }
    child.set(vars::DEVELOPER_DIR, dev.root());

    let deployment = sdk.and_then(|s| s.deployment_target.as_ref());
    match resolve_triple(
        env.get(TARGET_TRIPLE_VAR),
        &sdk_label,
        sdk.and_then(|s| s.default_arch.as_deref()),
        deployment.map(|d| d.version.as_str()),
    ) {
        Ok(triple) => child.set(TARGET_TRIPLE_VAR, triple.into_string()),
        Err(e) => warn!("failed to retrieve target triple information for SDK '{sdk_label}' ({e})"),
    }

    if let Some(value) = env.get_os(vars::IPHONEOS_DEPLOYMENT_TARGET) {
        child.set(vars::IPHONEOS_DEPLOYMENT_TARGET, value);
    } else if let Some(value) = env.get_os(vars::MACOSX_DEPLOYMENT_TARGET) {
        child.set(vars::MACOSX_DEPLOYMENT_TARGET, value);
    } else if let Some(target) = deployment {
        child.set(target.kind.env_var(), target.version.as_str());
    } else {
        warn!("failed to retrieve deployment target information for SDK '{sdk_label}'");
    }

    Ok(child)
}
