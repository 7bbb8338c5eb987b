//! Dispatch error types.

use std::path::PathBuf;

use xcrun_sdk::SdkError;
use xcrun_targets::TripleError;

/// Errors that can occur while resolving or launching a tool.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Developer directory, bundle path or descriptor failure.
    #[error(transparent)]
    Sdk(#[from] SdkError),

    /// No directory in the search path holds the requested executable.
    #[error("unable to locate command '{name}' (searched {searched})")]
    CommandNotFound { name: String, searched: String },

    /// The located executable could not be started.
    #[error("can't exec '{}' ({source})", path.display())]
    ExecFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A target triple was required but could not be produced.
    #[error(transparent)]
    Triple(#[from] TripleError),
}

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
