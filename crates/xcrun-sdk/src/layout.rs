//! Bundle paths inside a developer directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{SDKS_DIR, SDK_EXTENSION, TOOLCHAINS_DIR, TOOLCHAIN_EXTENSION};
use crate::error::{Result, SdkError};

/// The active developer directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperDir {
    root: PathBuf,
}

impl DeveloperDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DeveloperDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<developer_dir>/usr/bin`
    pub fn bin_dir(&self) -> PathBuf {
        bin_dir(&self.root)
    }

    /// Path of the named SDK bundle, validated to be a directory.
    pub fn sdk_path(&self, name: &str) -> Result<PathBuf> {
        let path = self
            .root
            .join(SDKS_DIR)
            .join(format!("{name}.{SDK_EXTENSION}"));
        validate_bundle(path, "sdk")
    }

    /// Path of the named toolchain bundle, validated to be a directory.
    pub fn toolchain_path(&self, name: &str) -> Result<PathBuf> {
        let path = self
            .root
            .join(TOOLCHAINS_DIR)
            .join(format!("{name}.{TOOLCHAIN_EXTENSION}"));
        validate_bundle(path, "toolchain")
    }
}

/// `<bundle>/usr/bin`
pub fn bin_dir(bundle: &Path) -> PathBuf {
    bundle.join("usr").join("bin")
}

/// `<bundle>/usr/lib`
pub fn lib_dir(bundle: &Path) -> PathBuf {
    bundle.join("usr").join("lib")
}

fn validate_bundle(path: PathBuf, kind: &'static str) -> Result<PathBuf> {
    validate_directory(&path, kind)?;
    debug!(path = %path.display(), kind, "validated bundle path");
    Ok(path)
}

/// Check that `path` exists and is a directory.
pub fn validate_directory(path: &Path, kind: &'static str) -> Result<()> {
    let meta = std::fs::metadata(path).map_err(|e| SdkError::PathInvalid {
        kind,
        path: path.to_path_buf(),
        reason: format!("unable to validate path: {e}"),
    })?;
    if !meta.is_dir() {
        return Err(SdkError::PathInvalid {
            kind,
            path: path.to_path_buf(),
            reason: "not a directory".into(),
        });
    }
    Ok(())
}

/// Reduce an SDK/toolchain reference to its bare bundle name.
///
/// Takes the last path component and drops a trailing `.<extension>`, so
/// `/Developer/SDKs/MacOSX10.9.sdk` becomes `MacOSX10.9` for `extension = "sdk"`.
pub fn bundle_name(reference: &str, extension: &str) -> String {
    let trimmed = reference.trim_end_matches('/');
    let base = trimmed.rsplit('/').next().unwrap_or(trimmed);
    base.strip_suffix(extension)
        .and_then(|stem| stem.strip_suffix('.'))
        .unwrap_or(base)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_with(dirs: &[&str]) -> (tempfile::TempDir, DeveloperDir) {
        let tmp = tempfile::tempdir().unwrap();
        for d in dirs {
            std::fs::create_dir_all(tmp.path().join(d)).unwrap();
        }
        let dev = DeveloperDir::new(tmp.path());
        (tmp, dev)
    }

    #[test]
    fn sdk_path_is_under_sdks() {
        let (tmp, dev) = dev_with(&["SDKs/MacOSX10.9.sdk"]);
        let path = dev.sdk_path("MacOSX10.9").unwrap();
        assert_eq!(path, tmp.path().join("SDKs").join("MacOSX10.9.sdk"));
    }

    #[test]
    fn toolchain_path_is_under_toolchains() {
        let (tmp, dev) = dev_with(&["Toolchains/Default.toolchain"]);
        let path = dev.toolchain_path("Default").unwrap();
        assert_eq!(path, tmp.path().join("Toolchains").join("Default.toolchain"));
    }

    #[test]
    fn missing_bundle_is_path_invalid() {
        let (_tmp, dev) = dev_with(&[]);
        let err = dev.sdk_path("Nope").unwrap_err();
        assert!(matches!(err, SdkError::PathInvalid { kind: "sdk", .. }));
        let err = dev.toolchain_path("Nope").unwrap_err();
        assert!(matches!(err, SdkError::PathInvalid { kind: "toolchain", .. }));
    }

    #[test]
    fn file_in_place_of_bundle_is_rejected() {
        let (tmp, dev) = dev_with(&["SDKs"]);
        std::fs::write(tmp.path().join("SDKs/Flat.sdk"), "not a dir").unwrap();
        let err = dev.sdk_path("Flat").unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn bin_and_lib_dirs() {
        let dev = DeveloperDir::new("/dev");
        assert_eq!(dev.bin_dir(), PathBuf::from("/dev/usr/bin"));
        assert_eq!(lib_dir(Path::new("/tc")), PathBuf::from("/tc/usr/lib"));
    }

    #[test]
    fn bundle_name_strips_dir_and_extension() {
        assert_eq!(bundle_name("/Developer/SDKs/MacOSX10.9.sdk", "sdk"), "MacOSX10.9");
        assert_eq!(bundle_name("/Developer/SDKs/MacOSX10.9.sdk/", "sdk"), "MacOSX10.9");
        assert_eq!(bundle_name("iPhoneOS.sdk", "sdk"), "iPhoneOS");
        assert_eq!(bundle_name("Default.toolchain", "toolchain"), "Default");
        assert_eq!(bundle_name("MacOSX10.9", "sdk"), "MacOSX10.9");
        assert_eq!(bundle_name("Default", "toolchain"), "Default");
    }
}
