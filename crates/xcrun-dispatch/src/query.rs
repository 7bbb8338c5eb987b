//! `--show-sdk-*` queries.

use xcrun_sdk::Environ;
use xcrun_targets::{resolve_triple, TARGET_TRIPLE_VAR};

use crate::bundles::Bundles;
use crate::context::ResolutionContext;
use crate::error::Result;

/// A question about the current SDK or toolchain.
///
/// Variants are declared in the order they take precedence when several are
/// requested at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SdkQuery {
    SdkPath,
    SdkVersion,
    ToolchainPath,
    ToolchainVersion,
    TargetTriple,
}

/// Answer `query` for `ctx` as the line printed to stdout.
///
/// Only the bundles a query needs are resolved, so an inherited
/// `TARGET_TRIPLE` is reported even when the SDK does not exist.
pub fn answer(ctx: &ResolutionContext, env: &Environ, query: SdkQuery) -> Result<String> {
    let bundles = Bundles::new(ctx);

    match query {
        SdkQuery::SdkPath => Ok(bundles.sdk_dir()?.display().to_string()),
        SdkQuery::SdkVersion => {
            let sdk = bundles.sdk_descriptor()?.cloned().unwrap_or_default();
            let name = match sdk.name {
                Some(name) => name,
                None => sdk_label(&bundles)?,
            };
            Ok(format!("{name} SDK version {}", sdk.version.unwrap_or_default()))
        }
        SdkQuery::ToolchainPath => Ok(bundles.toolchain_dir()?.display().to_string()),
        SdkQuery::ToolchainVersion => {
            let sdk = bundles.sdk_descriptor()?.cloned().unwrap_or_default();
            let name = match sdk.name {
                Some(name) => name,
                None => sdk_label(&bundles)?,
            };
            let tc = bundles.toolchain_descriptor()?;
            Ok(format!(
                "{name} SDK Toolchain version {} ({})",
                tc.version.as_deref().unwrap_or_default(),
                tc.name.as_deref().unwrap_or_default()
            ))
        }
        SdkQuery::TargetTriple => {
            if let Some(triple) = env.get(TARGET_TRIPLE_VAR) {
                return Ok(triple.to_string());
            }
            let sdk = bundles.sdk_descriptor()?;
            let triple = resolve_triple(
                None,
                &sdk_label(&bundles)?,
                sdk.and_then(|s| s.default_arch.as_deref()),
                sdk.and_then(|s| s.deployment_target.as_ref())
                    .map(|d| d.version.as_str()),
            )?;
            Ok(triple.into_string())
        }
    }
}

/// The SDK's selected name, or its directory for a path override.
fn sdk_label(bundles: &Bundles<'_>) -> Result<String> {
    match bundles.context().sdk().name() {
        Some(name) => Ok(name.to_string()),
        None => Ok(bundles.sdk_dir()?.display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextBuilder;
    use crate::error::DispatchError;
    use std::path::Path;
    use xcrun_sdk::DeveloperDir;
    use xcrun_targets::TripleError;

    fn bundle(root: &Path, rel: &str, info: &str) {
        let dir = root.join(rel);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("info.ini"), info).unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        bundle(
            tmp.path(),
            "SDKs/iPhoneOS7.0.sdk",
            "[SDK]\nname = iPhoneOS\nversion = 7.0\ntoolchain = iOS\ndefault_arch = armv7\niphoneos_deployment_target = 7.0\n",
        );
        bundle(tmp.path(), "SDKs/Bare.sdk", "[SDK]\nname = Bare\ntoolchain = iOS\n");
        bundle(tmp.path(), "Toolchains/iOS.toolchain", "[TOOLCHAIN]\nname = iOS\nversion = 3.4\n");
        tmp
    }

    fn context(root: &Path, sdk: &str) -> ResolutionContext {
        ContextBuilder::new(DeveloperDir::new(root))
            .sdk(sdk)
            .unwrap()
            .toolchain("iOS")
            .unwrap()
            .resolve(&Environ::new())
            .unwrap()
    }

    #[test]
    fn paths() {
        let tmp = fixture();
        let ctx = context(tmp.path(), "iPhoneOS7.0");
        let env = Environ::new();
        assert_eq!(
            answer(&ctx, &env, SdkQuery::SdkPath).unwrap(),
            tmp.path().join("SDKs/iPhoneOS7.0.sdk").display().to_string()
        );
        assert_eq!(
            answer(&ctx, &env, SdkQuery::ToolchainPath).unwrap(),
            tmp.path().join("Toolchains/iOS.toolchain").display().to_string()
        );
    }

    #[test]
    fn versions() {
        let tmp = fixture();
        let ctx = context(tmp.path(), "iPhoneOS7.0");
        let env = Environ::new();
        assert_eq!(answer(&ctx, &env, SdkQuery::SdkVersion).unwrap(), "iPhoneOS SDK version 7.0");
        assert_eq!(
            answer(&ctx, &env, SdkQuery::ToolchainVersion).unwrap(),
            "iPhoneOS SDK Toolchain version 3.4 (iOS)"
        );
    }

    #[test]
    fn target_triple() {
        let tmp = fixture();
        let ctx = context(tmp.path(), "iPhoneOS7.0");
        assert_eq!(
            answer(&ctx, &Environ::new(), SdkQuery::TargetTriple).unwrap(),
            "armv7-apple-darwin14"
        );
        let env = Environ::new().with("TARGET_TRIPLE", "arm64-apple-ios");
        assert_eq!(answer(&ctx, &env, SdkQuery::TargetTriple).unwrap(), "arm64-apple-ios");
    }

    #[test]
    fn triple_override_needs_no_sdk() {
        let tmp = fixture();
        let ctx = context(tmp.path(), "Gone");
        let env = Environ::new().with("TARGET_TRIPLE", "arm64-apple-ios");
        assert_eq!(answer(&ctx, &env, SdkQuery::TargetTriple).unwrap(), "arm64-apple-ios");
        assert!(answer(&ctx, &Environ::new(), SdkQuery::TargetTriple).is_err());
        assert!(answer(&ctx, &env, SdkQuery::SdkPath).is_err());
    }

    #[test]
    fn toolchain_path_needs_no_sdk() {
        let tmp = fixture();
        let ctx = context(tmp.path(), "Gone");
        assert_eq!(
            answer(&ctx, &Environ::new(), SdkQuery::ToolchainPath).unwrap(),
            tmp.path().join("Toolchains/iOS.toolchain").display().to_string()
        );
    }

    #[test]
    fn target_triple_unavailable_is_an_error() {
        let tmp = fixture();
        let ctx = context(tmp.path(), "Bare");
        let err = answer(&ctx, &Environ::new(), SdkQuery::TargetTriple).unwrap_err();
        assert!(matches!(err, DispatchError::Triple(TripleError::MissingArchitecture { .. })));
    }

    #[test]
    fn precedence_order() {
        let mut asked = vec![SdkQuery::TargetTriple, SdkQuery::SdkVersion, SdkQuery::ToolchainPath];
        asked.sort();
        assert_eq!(asked[0], SdkQuery::SdkVersion);
    }
}
