//! Configuration types for bundling operations.

mod config;
mod environment;

// Re-export all public types
pub use config::Configuration;
pub use environment::{Environment, Os, host_arch, host_os};
