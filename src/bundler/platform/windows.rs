//! Windows finalization and icon embedding.

use crate::bail;
use crate::bundler::error::{Error, Result};
use crate::bundler::utils::fs;
use std::path::Path;

/// Name of the synthesized resource object, picked up by the toolchain when
/// compiling for windows.
const SYSO_NAME: &str = "windows.syso";

/// Synthesizes a native resource object carrying the configured icon.
///
/// Runs before compilation so the resulting binary embeds the icon. Without
/// a configured icon this is a no-op; with one, the external `rsrc` resource
/// compiler is required.
pub async fn embed_icon(input_path: &Path, icon: Option<&Path>, arch: &str) -> Result<()> {
    let Some(icon) = icon else { return Ok(()) };

    let rsrc = which::which("rsrc").map_err(|_| {
        Error::GenericError(
            "rsrc was not found in PATH, it is required to embed windows icons".into(),
        )
    })?;

    let syso_path = input_path.join(SYSO_NAME);
    log::debug!(
        "Running rsrc for icon {} into {}",
        icon.display(),
        syso_path.display()
    );
    let output = tokio::process::Command::new(&rsrc)
        .arg("-ico")
        .arg(icon)
        .arg("-o")
        .arg(&syso_path)
        .arg("-arch")
        .arg(arch)
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: rsrc.display().to_string(),
            error,
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        bail!(
            "running rsrc for icon {} failed: {}",
            icon.display(),
            combined
        );
    }
    Ok(())
}

/// Moves the raw binary to the environment root with a `.exe` suffix.
pub async fn finalize(app_name: &str, environment_path: &Path, binary_path: &Path) -> Result<()> {
    let windows_binary_path = environment_path.join(format!("{app_name}.exe"));
    log::debug!(
        "Moving {} to {}",
        binary_path.display(),
        windows_binary_path.display()
    );
    fs::move_file(binary_path, &windows_binary_path).await
}
