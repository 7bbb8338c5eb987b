//! Fixed file names and locations.

/// Per-user cache file, relative to `$HOME`, holding the selected developer
/// directory. Written by `xcode-select`.
pub const DEVELOPER_DIR_CACHE: &str = ".xcdev.dat";

/// System-wide default SDK/toolchain selection.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/xcrun.ini";

/// Descriptor file inside every SDK and toolchain bundle.
pub const DESCRIPTOR_FILE: &str = "info.ini";

pub const SDKS_DIR: &str = "SDKs";
pub const TOOLCHAINS_DIR: &str = "Toolchains";
pub const SDK_EXTENSION: &str = "sdk";
pub const TOOLCHAIN_EXTENSION: &str = "toolchain";

/// Descriptor sections.
pub const SDK_SECTION: &str = "SDK";
pub const TOOLCHAIN_SECTION: &str = "TOOLCHAIN";

/// Environment variables read while resolving.
pub mod vars {
    pub const DEVELOPER_DIR: &str = "DEVELOPER_DIR";
    pub const HOME: &str = "HOME";
    pub const PATH: &str = "PATH";
    pub const SDKROOT: &str = "SDKROOT";
    pub const TOOLCHAINS: &str = "TOOLCHAINS";
    pub const IPHONEOS_DEPLOYMENT_TARGET: &str = "IPHONEOS_DEPLOYMENT_TARGET";
    pub const MACOSX_DEPLOYMENT_TARGET: &str = "MACOSX_DEPLOYMENT_TARGET";
    pub const LD_LIBRARY_PATH: &str = "LD_LIBRARY_PATH";
}
