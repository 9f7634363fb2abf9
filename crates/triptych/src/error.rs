//! Error types for Triptych

use thiserror::Error;

/// Main error type for lint runs.
#[derive(Error, Debug)]
pub enum LintError {
    /// An input could not be read
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// The offending path
        path: String,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Configuration was invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The run was interrupted before finishing
    #[error("lint run was interrupted")]
    Interrupted,
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config `{path}`: {source}")]
    Io {
        /// The offending path
        path: String,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// The configuration file was not valid JSON
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// An override names a rule that does not exist
    #[error("unknown rule `{name}` in configuration")]
    UnknownRule {
        /// The unrecognized rule id
        name: String,
    },
}

/// Result type alias for Triptych operations.
pub type Result<T> = std::result::Result<T, LintError>;
