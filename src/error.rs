//! Top level error types for the bundler binary.

use thiserror::Error;

/// Result type alias for top level operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the binary surface
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bundling errors
    #[error("bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
