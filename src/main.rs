//! Bundler binary - packages appshell applications into native OS bundles.
//!
//! Loads the bundle configuration, applies CLI overrides and runs the
//! requested command (bundle, bind or clear-cache).

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match appshell_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
