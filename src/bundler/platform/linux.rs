//! Linux finalization.
//!
//! TODO: emit a freedesktop .desktop entry referencing the configured linux
//! icon.

use crate::bundler::error::Result;
use crate::bundler::utils::fs;
use std::path::Path;

/// Moves the raw binary to the environment root, named after the app.
pub async fn finalize(app_name: &str, environment_path: &Path, binary_path: &Path) -> Result<()> {
    let linux_binary_path = environment_path.join(app_name);
    log::debug!(
        "Moving {} to {}",
        binary_path.display(),
        linux_binary_path.display()
    );
    fs::move_file(binary_path, &linux_binary_path).await
}
