//! Cross-platform bundler for appshell applications.
//!
//! Packages an already-written application into OS-native distributable
//! bundles: a macOS `.app` bundle, a windows `.exe` carrying its icon, or a
//! flat linux binary. For every configured target environment the bundler
//! provisions the binary runtime dependencies (with a download cache), embeds
//! the project's resources into generated source, builds the linker flags,
//! invokes the compiler toolchain and finalizes the bundle for that OS.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use bundler::{Bundler, Configuration, Environment};
pub use error::{BundlerError, CliError, Result};
