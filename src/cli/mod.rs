//! Command line interface for the bundler.
//!
//! Loads the configuration document, applies flag overrides and dispatches
//! to the bundling core.

mod args;

pub use args::{Args, Command};

use crate::bundler::settings::{Environment, host_arch, host_os};
use crate::bundler::{Bundler, Configuration};
use crate::error::Result;

/// Name of the configuration file looked up in the working directory when
/// `-c` is not given.
const DEFAULT_CONFIGURATION_FILE: &str = "bundler.json";

/// Main CLI entry point, returning the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    // Configuration
    let configuration_path = match &args.configuration {
        Some(path) => path.clone(),
        None => std::env::current_dir()?.join(DEFAULT_CONFIGURATION_FILE),
    };
    let mut configuration = Configuration::load(&configuration_path)?;

    // Flag overrides
    if let Some(output) = &args.output {
        configuration.output_path = Some(output.clone());
    }
    if args.darwin {
        configuration.environments.push(Environment {
            os: "darwin".into(),
            arch: host_arch().into(),
        });
    }
    if args.linux {
        configuration.environments.push(Environment {
            os: "linux".into(),
            arch: host_arch().into(),
        });
    }
    if args.windows {
        configuration.environments.push(Environment {
            os: "windows".into(),
            arch: host_arch().into(),
        });
    }
    if configuration.environments.is_empty() {
        configuration.environments.push(Environment {
            os: host_os().into(),
            arch: host_arch().into(),
        });
    }

    // Build bundler and dispatch
    let bundler = Bundler::new(&configuration)?;
    match args.command.unwrap_or(Command::Bundle) {
        Command::Bundle => bundler.bundle().await?,
        Command::Bind => bundler.bind_resources().await?,
        Command::ClearCache => bundler.clear_cache().await?,
    }
    Ok(0)
}
