//! Darwin target-triple synthesis for xcrun.
//!
//! Builds the compiler-facing `<arch>-apple-darwin<kernel>` string from the
//! deployment target recorded in an SDK descriptor and the SDK's default
//! architecture:
//! - **Architecture:** desktop-class (x86 family) vs. mobile/embedded
//! - **Deployment version:** leniently scanned `major.minor.patch`
//! - **Kernel table:** OS major version to Darwin kernel major version

pub mod arch;
pub mod error;
pub mod triple;
pub mod version;

pub use arch::ArchClass;
pub use error::{Result, TripleError};
pub use triple::{kernel_version, resolve_triple, synthesize, TargetTriple, TARGET_TRIPLE_VAR};
pub use version::DeploymentVersion;
