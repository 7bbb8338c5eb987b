//! Developer directory, SDK and toolchain descriptors for xcrun.
//!
//! A developer directory holds every installed SDK and toolchain:
//!
//! ```text
//! <developer_dir>/
//!   usr/bin/
//!   SDKs/
//!     <name>.sdk/
//!       info.ini          [SDK] name, version, toolchain, default_arch, *_deployment_target
//!       usr/bin/
//!   Toolchains/
//!     <name>.toolchain/
//!       info.ini          [TOOLCHAIN] name, version
//!       usr/bin/
//!       usr/lib/
//! ```
//!
//! This crate finds the active developer directory, computes and validates
//! bundle paths inside it, and loads the `info.ini` descriptors.

pub mod config;
pub mod descriptor;
pub mod devdir;
pub mod environ;
pub mod error;
pub mod layout;

pub use descriptor::{
    has_descriptor, load_defaults, load_sdk, load_toolchain, DefaultConfiguration,
    DeploymentKind, DeploymentTarget, SdkDescriptor, ToolchainDescriptor,
};
pub use devdir::resolve_developer_dir;
pub use environ::Environ;
pub use error::{Result, SdkError};
pub use layout::{bundle_name, validate_directory, DeveloperDir};
