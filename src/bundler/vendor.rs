//! Vendor archive provisioning with a download cache.
//!
//! An appshell application links against two binary dependencies at build
//! time: the portable runtime archive and an OS/arch specific engine
//! archive. Both are fetched once into a cache directory and mirrored into
//! the project's `vendor/` directory before every compilation. Presence of a
//! cache file on disk is the cache-hit signal; no checksum or expiry is
//! tracked.

use crate::bundler::error::{Context, Result};
use crate::bundler::settings::Environment;
use crate::bundler::utils::{fs, http};
use std::path::Path;

/// Version of the portable runtime archive.
pub const RUNTIME_VERSION: &str = "0.4.2";

/// Version of the engine archive.
pub const ENGINE_VERSION: &str = "11.4.2";

/// Name of the runtime archive inside the vendor directory.
pub const VENDOR_RUNTIME_ZIP: &str = "runtime.zip";

/// Name of the engine archive inside the vendor directory.
pub const VENDOR_ENGINE_ZIP: &str = "engine.zip";

const RUNTIME_DOWNLOAD_BASE: &str = "https://github.com/appshell/appshell/releases/download";
const ENGINE_DOWNLOAD_BASE: &str = "https://github.com/appshell/engine/releases/download";

/// Returns the cache file name of the runtime archive.
///
/// The runtime is portable, so the name only varies with its version.
pub fn runtime_cache_name() -> String {
    format!("runtime-{RUNTIME_VERSION}.zip")
}

/// Returns the cache file name of the engine archive for an OS and arch.
pub fn engine_cache_name(os: &str, arch: &str) -> String {
    format!("engine-{os}-{arch}-{ENGINE_VERSION}.zip")
}

/// Returns the download URL of the runtime archive.
pub fn runtime_download_url() -> String {
    format!(
        "{RUNTIME_DOWNLOAD_BASE}/v{RUNTIME_VERSION}/{}",
        runtime_cache_name()
    )
}

/// Returns the download URL of the engine archive for an OS and arch.
pub fn engine_download_url(os: &str, arch: &str) -> String {
    format!(
        "{ENGINE_DOWNLOAD_BASE}/v{ENGINE_VERSION}/{}",
        engine_cache_name(os, arch)
    )
}

/// Guarantees a vendor archive is present, downloading it on a cache miss.
///
/// When the cache file already exists the transfer is skipped entirely, with
/// no freshness or checksum verification. The cache file is then mirrored to
/// `vendor_path` as-is; it is not extracted.
pub async fn provision_zip(
    client: &reqwest::Client,
    url: &str,
    cache_path: &Path,
    vendor_path: &Path,
) -> Result<()> {
    if !cache_path.exists() {
        http::download(client, url, cache_path)
            .await
            .with_context(|| {
                format!("downloading {} into {} failed", url, cache_path.display())
            })?;
    } else {
        log::debug!(
            "{} already exists, skipping download of {}",
            cache_path.display(),
            url
        );
    }

    log::debug!(
        "Copying {} to {}",
        cache_path.display(),
        vendor_path.display()
    );
    fs::copy_file(cache_path, vendor_path).await.with_context(|| {
        format!(
            "copying {} to {} failed",
            cache_path.display(),
            vendor_path.display()
        )
    })
}

/// Recreates the vendor directory and provisions both archives for an
/// environment.
///
/// The vendor directory is never reused between environments or across
/// runs; only the cache layer is.
pub async fn provision(
    client: &reqwest::Client,
    cache_path: &Path,
    vendor_path: &Path,
    environment: &Environment,
) -> Result<()> {
    log::debug!("Recreating {}", vendor_path.display());
    fs::create_dir_all(vendor_path, true).await?;

    provision_zip(
        client,
        &runtime_download_url(),
        &cache_path.join(runtime_cache_name()),
        &vendor_path.join(VENDOR_RUNTIME_ZIP),
    )
    .await
    .context("provisioning the runtime archive failed")?;

    provision_zip(
        client,
        &engine_download_url(&environment.os, &environment.arch),
        &cache_path.join(engine_cache_name(&environment.os, &environment.arch)),
        &vendor_path.join(VENDOR_ENGINE_ZIP),
    )
    .await
    .with_context(|| {
        format!(
            "provisioning the engine archive for {}/{} failed",
            environment.os, environment.arch
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so any attempted transfer fails
    // fast instead of hanging the test.
    const UNREACHABLE_URL: &str = "http://127.0.0.1:9/archive.zip";

    #[test]
    fn cache_names_carry_os_arch_and_version() {
        assert_eq!(
            engine_cache_name("darwin", "amd64"),
            format!("engine-darwin-amd64-{ENGINE_VERSION}.zip")
        );
        assert_eq!(runtime_cache_name(), format!("runtime-{RUNTIME_VERSION}.zip"));
    }

    #[tokio::test]
    async fn an_existing_cache_file_skips_the_transfer() {
        let temp = tempfile::tempdir().unwrap();
        let cache_path = temp.path().join("cache").join(runtime_cache_name());
        tokio::fs::create_dir_all(cache_path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&cache_path, b"cached archive").await.unwrap();

        let client = reqwest::Client::new();
        let vendor_path = temp.path().join("vendor").join(VENDOR_RUNTIME_ZIP);

        // Both calls succeed without any transfer taking place.
        provision_zip(&client, UNREACHABLE_URL, &cache_path, &vendor_path)
            .await
            .unwrap();
        provision_zip(&client, UNREACHABLE_URL, &cache_path, &vendor_path)
            .await
            .unwrap();

        assert_eq!(
            tokio::fs::read(&vendor_path).await.unwrap(),
            b"cached archive"
        );
    }

    #[tokio::test]
    async fn a_failed_download_aborts_provisioning() {
        let temp = tempfile::tempdir().unwrap();
        let cache_path = temp.path().join("cache").join(runtime_cache_name());
        let vendor_path = temp.path().join("vendor").join(VENDOR_RUNTIME_ZIP);

        let client = reqwest::Client::new();
        let err = provision_zip(&client, UNREACHABLE_URL, &cache_path, &vendor_path)
            .await
            .unwrap_err();

        assert!(err.to_string().contains(UNREACHABLE_URL));
        assert!(!vendor_path.exists());
    }
}
