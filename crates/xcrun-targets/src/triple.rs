//! Target-triple synthesis.

use std::fmt;

use tracing::debug;

use crate::arch::ArchClass;
use crate::error::{Result, TripleError};
use crate::version::DeploymentVersion;

/// Environment variable that, when set, replaces synthesis entirely.
pub const TARGET_TRIPLE_VAR: &str = "TARGET_TRIPLE";

/// A rendered target triple such as `x86_64-apple-darwin14`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetTriple(String);

impl TargetTriple {
    /// Wrap an externally supplied triple without interpreting it.
    pub fn verbatim(triple: impl Into<String>) -> Self {
        TargetTriple(triple.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map an OS deployment version to the Darwin kernel major version.
pub fn kernel_version(version: DeploymentVersion, class: ArchClass) -> u32 {
    match version.major {
        11 => 17,
        10 if class.is_desktop() => version.minor.saturating_add(4),
        10 => 16,
        9 => 15,
        7 | 8 => 14,
        6 => 13,
        5 => 11,
        4 if version.minor <= 2 => 10,
        4 => 11,
        3 => 10,
        _ => 9,
    }
}

/// Synthesize `<arch>-apple-darwin<kernel>` from a deployment version string.
///
/// Returns `None` when the version string or the architecture is empty.
pub fn synthesize(deployment_version: &str, arch: &str) -> Option<TargetTriple> {
    if arch.is_empty() {
        return None;
    }
    let version = DeploymentVersion::scan(deployment_version)?;
    let kernel = kernel_version(version, ArchClass::of(arch));
    Some(TargetTriple(format!("{arch}-apple-darwin{kernel}")))
}

/// Resolve the triple for an SDK, honoring the `TARGET_TRIPLE` override.
///
/// `override_triple` is the value of [`TARGET_TRIPLE_VAR`] in the caller's
/// environment; when present it is returned untouched and the SDK fields are
/// not consulted.
pub fn resolve_triple(
    override_triple: Option<&str>,
    sdk: &str,
    default_arch: Option<&str>,
    deployment_target: Option<&str>,
) -> Result<TargetTriple> {
    if let Some(triple) = override_triple {
        debug!(triple, "using target triple from {TARGET_TRIPLE_VAR}");
        return Ok(TargetTriple::verbatim(triple));
    }

    let arch = default_arch
        .filter(|a| !a.is_empty())
        .ok_or_else(|| TripleError::MissingArchitecture { sdk: sdk.to_string() })?;
    let version = deployment_target.ok_or_else(|| TripleError::MissingDeploymentTarget {
        sdk: sdk.to_string(),
    })?;

    let triple = synthesize(version, arch).ok_or_else(|| TripleError::MissingDeploymentTarget {
        sdk: sdk.to_string(),
    })?;
    debug!(%triple, sdk, "synthesized target triple");
    Ok(triple)
}
