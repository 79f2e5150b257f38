//! OS-specific bundle finalization.
//!
//! Finalization rearranges the raw compiled binary into the OS-native bundle
//! shape. Dispatch is keyed by the OS identifier and re-parses it, so an
//! unsupported value surfaces here even when finalization runs outside the
//! orchestrator's construction-time validation.

pub mod darwin;
pub mod linux;
pub mod windows;

use crate::bundler::error::{Error, Result};
use crate::bundler::settings::Os;
use std::path::Path;

/// Finishes the bundle for one environment based on its OS.
///
/// # Errors
///
/// Returns an unsupported-OS error for any identifier outside the supported
/// set, and propagates any failing finalization step with the path involved.
pub async fn finalize(
    os: &str,
    app_name: &str,
    environment_path: &Path,
    binary_path: &Path,
    icon_darwin: Option<&Path>,
) -> Result<()> {
    match Os::parse(os) {
        Some(Os::Darwin) => {
            darwin::finalize(app_name, environment_path, binary_path, icon_darwin).await
        }
        Some(Os::Linux) => linux::finalize(app_name, environment_path, binary_path).await,
        Some(Os::Windows) => windows::finalize(app_name, environment_path, binary_path).await,
        None => Err(Error::UnsupportedOs(os.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn an_unknown_os_is_rejected_at_dispatch() {
        let temp = tempfile::tempdir().unwrap();
        let err = finalize(
            "freebsd",
            "Foo",
            temp.path(),
            &temp.path().join("binary"),
            None,
        )
        .await
        .unwrap_err();

        match err {
            Error::UnsupportedOs(os) => assert_eq!(os, "freebsd"),
            other => panic!("expected an unsupported OS error, got {other:?}"),
        }
    }
}
