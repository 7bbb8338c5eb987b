//! Error types for target-triple resolution.

/// Why a target triple could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripleError {
    /// The SDK does not declare a deployment target.
    #[error("no deployment target is available for SDK '{sdk}'")]
    MissingDeploymentTarget {
        /// SDK the triple was requested for.
        sdk: String,
    },

    /// The SDK does not declare a default architecture.
    #[error("no default architecture is available for SDK '{sdk}'")]
    MissingArchitecture {
        /// SDK the triple was requested for.
        sdk: String,
    },
}

/// Result type for triple operations.
pub type Result<T> = std::result::Result<T, TripleError>;
