//! Error types for bundling operations.
//!
//! Provides contextual error chaining via the [`Context`] trait, filesystem
//! errors carrying the offending path via [`ErrorExt`], and the [`bail!`]
//! macro for early returns with formatted messages. Every failure in the
//! bundling core is wrapped with the operation and the path or value
//! involved, and propagates synchronously: the first failing step aborts the
//! whole bundle invocation.

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the bundling core.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g. "creating directory")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Child process could not be spawned.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// The toolchain exited with a non-zero status.
    ///
    /// Carries the combined standard output and standard error verbatim so
    /// the compiler's diagnostics reach the caller unchanged.
    #[error("building for {environment} failed: {output}")]
    BuildFailed {
        /// Environment being built, as `os/arch`
        environment: String,
        /// Combined stdout and stderr of the toolchain
        output: String,
    },

    /// A vendor archive download came back with a non-success status.
    #[error("downloading {url} failed with status {status}")]
    DownloadFailed {
        /// URL that was requested
        url: String,
        /// HTTP status code of the response
        status: u16,
    },

    /// An environment names an OS outside the supported set.
    #[error("OS {0} is invalid")]
    InvalidOs(String),

    /// Finalization was asked to handle an OS it has no handler for.
    #[error("OS {0} is not supported")]
    UnsupportedOs(String),

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// JSON deserialization error (configuration documents).
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP client error (vendor archive downloads).
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("{0}")]
    UrlParse(#[from] url::ParseError),

    /// Error walking the resource directory.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

/// Trait for adding context to errors.
///
/// Works with both `Result<T>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    ///
    /// Use this when context string construction is expensive.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the
    /// operation, e.g. "reading file", "creating directory".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns
/// immediately.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
