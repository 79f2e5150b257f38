//! Command line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Packages appshell applications into native OS bundles
#[derive(Parser, Debug)]
#[command(
    name = "appshell_bundler",
    version,
    about = "Packages appshell applications into native OS bundles",
    long_about = "Bundles an appshell application for one or more os/arch environments.

For every environment the bundler provisions the runtime and engine archives
(cached between runs), embeds the project's resources, cross-compiles the app
and rearranges the binary into the OS-native bundle shape: a macOS .app, a
windows .exe or a flat linux binary.

Usage:
  appshell_bundler -c bundler.json
  appshell_bundler -d -w -o ./dist
  appshell_bundler clear-cache"
)]
pub struct Args {
    /// Path to the configuration document
    ///
    /// Defaults to bundler.json in the working directory.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub configuration: Option<PathBuf>,

    /// Add darwin/<host arch> to the environments
    #[arg(short = 'd', long)]
    pub darwin: bool,

    /// Add linux/<host arch> to the environments
    #[arg(short = 'l', long)]
    pub linux: bool,

    /// Add windows/<host arch> to the environments
    #[arg(short = 'w', long)]
    pub windows: bool,

    /// Override the configured output path
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Command to run, bundling by default
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Bundler commands
#[derive(Subcommand, Clone, Copy, Debug)]
pub enum Command {
    /// Bundle the app for every configured environment (default)
    Bundle,
    /// Regenerate the embedded resource source only
    Bind,
    /// Remove the vendor archive cache
    ClearCache,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
