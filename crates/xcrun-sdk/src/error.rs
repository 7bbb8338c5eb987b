//! Error types for developer directory and descriptor operations.

use std::path::PathBuf;

/// Errors that can occur while locating bundles or reading descriptors.
///
/// Every variant is fatal to the invocation.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// No developer directory could be determined.
    #[error("unable to determine the developer directory: {detail}")]
    ConfigurationMissing { detail: String },

    /// A descriptor or configuration file is missing or unparseable.
    #[error("failed to retrieve {kind} info from '{}' ({reason})", path.display())]
    DescriptorLoad {
        /// What was being loaded ("sdk", "toolchain", "default").
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// A computed or supplied bundle path is not a usable directory.
    #[error("'{}' is not a valid {kind} path ({reason})", path.display())]
    PathInvalid {
        /// What the path was meant to be ("sdk", "toolchain", "directory").
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// The default configuration does not name the requested bundle.
    #[error("'{}' does not define a default {kind}", path.display())]
    MissingDefault { kind: &'static str, path: PathBuf },
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;
