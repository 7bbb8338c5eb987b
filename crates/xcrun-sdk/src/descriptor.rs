//! SDK, toolchain and default-configuration descriptors.
//!
//! All three are INI files. The reader hands back `(section, key, value)`
//! entries in file order and each loader keeps the pairs it recognizes;
//! anything else in the file is ignored.

use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use tracing::debug;

use crate::config::{vars, DESCRIPTOR_FILE, SDK_SECTION, TOOLCHAIN_SECTION};
use crate::error::{Result, SdkError};

/// Which platform family a deployment target applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentKind {
    /// `iphoneos_deployment_target`
    IPhoneOs,
    /// `macosx_deployment_target`
    MacOsX,
}

impl DeploymentKind {
    /// Key naming this kind in an SDK descriptor.
    pub fn ini_key(self) -> &'static str {
        match self {
            DeploymentKind::IPhoneOs => "iphoneos_deployment_target",
            DeploymentKind::MacOsX => "macosx_deployment_target",
        }
    }

    /// Environment variable carrying this kind to child processes.
    pub fn env_var(self) -> &'static str {
        match self {
            DeploymentKind::IPhoneOs => vars::IPHONEOS_DEPLOYMENT_TARGET,
            DeploymentKind::MacOsX => vars::MACOSX_DEPLOYMENT_TARGET,
        }
    }

    fn from_ini_key(key: &str) -> Option<Self> {
        [DeploymentKind::IPhoneOs, DeploymentKind::MacOsX]
            .into_iter()
            .find(|k| k.ini_key() == key)
    }
}

/// Minimum OS version an SDK targets, tagged with its platform family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub kind: DeploymentKind,
    pub version: String,
}

/// Contents of `<toolchain>/info.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Contents of `<sdk>/info.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
    /// Name of the toolchain this SDK is built with.
    pub toolchain: Option<String>,
    pub default_arch: Option<String>,
    /// The last deployment-target key in the file decides the kind.
    pub deployment_target: Option<DeploymentTarget>,
}

impl SdkDescriptor {
    /// The associated toolchain name, required for toolchain lookups.
    pub fn toolchain_name(&self, sdk_dir: &Path) -> Result<&str> {
        self.toolchain.as_deref().ok_or_else(|| SdkError::DescriptorLoad {
            kind: "sdk",
            path: descriptor_path(sdk_dir),
            reason: format!("missing 'toolchain' key in [{SDK_SECTION}]"),
        })
    }
}

/// Contents of the system-wide default configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultConfiguration {
    /// `[SDK] name`
    pub sdk: Option<String>,
    /// `[TOOLCHAIN] name`
    pub toolchain: Option<String>,
}

/// One `(section, key, value)` triple from an INI file.
type Entry = (String, String, String);

/// Path of the descriptor file inside a bundle.
pub fn descriptor_path(bundle: &Path) -> PathBuf {
    bundle.join(DESCRIPTOR_FILE)
}

/// Whether a bundle directory carries a descriptor file.
pub fn has_descriptor(bundle: &Path) -> bool {
    descriptor_path(bundle).is_file()
}

/// Load `<dir>/info.ini` as a toolchain descriptor.
pub fn load_toolchain(dir: &Path) -> Result<ToolchainDescriptor> {
    let path = descriptor_path(dir);
    let entries = read_entries(&path, "toolchain")?;
    let descriptor = toolchain_from_entries(entries);
    debug!(path = %path.display(), ?descriptor, "loaded toolchain descriptor");
    Ok(descriptor)
}

/// Load `<dir>/info.ini` as an SDK descriptor.
pub fn load_sdk(dir: &Path) -> Result<SdkDescriptor> {
    let path = descriptor_path(dir);
    let entries = read_entries(&path, "sdk")?;
    let descriptor = sdk_from_entries(entries);
    debug!(path = %path.display(), ?descriptor, "loaded sdk descriptor");
    Ok(descriptor)
}

/// Load the default SDK/toolchain selection from `path`.
pub fn load_defaults(path: &Path) -> Result<DefaultConfiguration> {
    let entries = read_entries(path, "default")?;
    let config = defaults_from_entries(entries);
    debug!(path = %path.display(), ?config, "loaded default configuration");
    Ok(config)
}

fn read_entries(path: &Path, kind: &'static str) -> Result<Vec<Entry>> {
    let option = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_file_opt(path, option).map_err(|e| SdkError::DescriptorLoad {
        kind,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(entries_of(&ini))
}

fn entries_of(ini: &Ini) -> Vec<Entry> {
    let mut entries = Vec::new();
    for (section, props) in ini {
        let Some(section) = section else { continue };
        for (key, value) in props.iter() {
            entries.push((section.to_string(), key.to_string(), value.to_string()));
        }
    }
    entries
}

fn toolchain_from_entries(entries: Vec<Entry>) -> ToolchainDescriptor {
    let mut descriptor = ToolchainDescriptor::default();
    for (section, key, value) in entries {
        if section != TOOLCHAIN_SECTION {
            continue;
        }
        match key.as_str() {
            "name" => descriptor.name = Some(value),
            "version" => descriptor.version = Some(value),
            _ => {}
        }
    }
    descriptor
}

fn sdk_from_entries(entries: Vec<Entry>) -> SdkDescriptor {
    let mut descriptor = SdkDescriptor::default();
    for (section, key, value) in entries {
        if section != SDK_SECTION {
            continue;
        }
        match key.as_str() {
            "name" => descriptor.name = Some(value),
            "version" => descriptor.version = Some(value),
            "toolchain" => descriptor.toolchain = Some(value),
            "default_arch" => descriptor.default_arch = Some(value),
            other => {
                if let Some(kind) = DeploymentKind::from_ini_key(other) {
                    descriptor.deployment_target = Some(DeploymentTarget { kind, version: value });
                }
            }
        }
    }
    descriptor
}

fn defaults_from_entries(entries: Vec<Entry>) -> DefaultConfiguration {
    let mut config = DefaultConfiguration::default();
    for (section, key, value) in entries {
        match (section.as_str(), key.as_str()) {
            (SDK_SECTION, "name") => config.sdk = Some(value),
            (TOOLCHAIN_SECTION, "name") => config.toolchain = Some(value),
            _ => {}
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_descriptor(dir: &Path, contents: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(DESCRIPTOR_FILE), contents).unwrap();
    }

    #[test]
    fn toolchain_fields() {
        let tmp = tempfile::tempdir().unwrap();
        write_descriptor(tmp.path(), "[TOOLCHAIN]\nname = Default\nversion = 5.0\n");
        let tc = load_toolchain(tmp.path()).unwrap();
        assert_eq!(tc.name.as_deref(), Some("Default"));
        assert_eq!(tc.version.as_deref(), Some("5.0"));
    }

    #[test]
    fn sdk_fields() {
        let tmp = tempfile::tempdir().unwrap();
        write_descriptor(
            tmp.path(),
            "[SDK]\n\
             name = MacOSX\n\
             version = 10.9\n\
             toolchain = Default\n\
             default_arch = x86_64\n\
             macosx_deployment_target = 10.9\n",
        );
        let sdk = load_sdk(tmp.path()).unwrap();
        assert_eq!(sdk.name.as_deref(), Some("MacOSX"));
        assert_eq!(sdk.version.as_deref(), Some("10.9"));
        assert_eq!(sdk.toolchain_name(tmp.path()).unwrap(), "Default");
        assert_eq!(sdk.default_arch.as_deref(), Some("x86_64"));
        assert_eq!(
            sdk.deployment_target,
            Some(DeploymentTarget { kind: DeploymentKind::MacOsX, version: "10.9".into() })
        );
    }

    #[test]
    fn last_deployment_key_wins() {
        let tmp = tempfile::tempdir().unwrap();
        write_descriptor(
            tmp.path(),
            "[SDK]\nmacosx_deployment_target = 10.9\niphoneos_deployment_target = 7.0\n",
        );
        let sdk = load_sdk(tmp.path()).unwrap();
        let target = sdk.deployment_target.unwrap();
        assert_eq!(target.kind, DeploymentKind::IPhoneOs);
        assert_eq!(target.version, "7.0");
    }

    #[test]
    fn keys_in_other_sections_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        write_descriptor(
            tmp.path(),
            "[TOOLCHAIN]\nname = Wrong\n[SDK]\nname = iPhoneOS\ncolor = blue\n",
        );
        let sdk = load_sdk(tmp.path()).unwrap();
        assert_eq!(sdk.name.as_deref(), Some("iPhoneOS"));
        assert!(sdk.toolchain.is_none());
        assert!(sdk.deployment_target.is_none());
    }

    #[test]
    fn missing_toolchain_key_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_descriptor(tmp.path(), "[SDK]\nname = Bare\n");
        let sdk = load_sdk(tmp.path()).unwrap();
        let err = sdk.toolchain_name(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("toolchain"));
    }

    #[test]
    fn defaults_read_both_sections() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("xcrun.ini");
        std::fs::write(&path, "[SDK]\nname = MacOSX10.9\n\n[TOOLCHAIN]\nname = Default\n").unwrap();
        let defaults = load_defaults(&path).unwrap();
        assert_eq!(defaults.sdk.as_deref(), Some("MacOSX10.9"));
        assert_eq!(defaults.toolchain.as_deref(), Some("Default"));
    }

    #[test]
    fn missing_file_is_descriptor_load() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_sdk(tmp.path()).unwrap_err();
        match err {
            SdkError::DescriptorLoad { kind, path, .. } => {
                assert_eq!(kind, "sdk");
                assert_eq!(path, tmp.path().join(DESCRIPTOR_FILE));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(load_defaults(&tmp.path().join("absent.ini")).is_err());
    }

    #[test]
    fn has_descriptor_checks_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!has_descriptor(tmp.path()));
        write_descriptor(tmp.path(), "[SDK]\n");
        assert!(has_descriptor(tmp.path()));
    }

    #[test]
    fn deployment_kind_names() {
        assert_eq!(DeploymentKind::MacOsX.env_var(), "MACOSX_DEPLOYMENT_TARGET");
        assert_eq!(DeploymentKind::IPhoneOs.env_var(), "IPHONEOS_DEPLOYMENT_TARGET");
        assert_eq!(
            DeploymentKind::from_ini_key("iphoneos_deployment_target"),
            Some(DeploymentKind::IPhoneOs)
        );
        assert_eq!(DeploymentKind::from_ini_key("tvos_deployment_target"), None);
    }
}
