//! HTTP utilities for provisioning vendor archives.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;
use url::Url;

/// Downloads a URL into a local file, creating any parent directories of the
/// destination path as necessary.
///
/// The transfer blocks the calling sequence; any transport error or
/// non-success status is fatal for the whole bundle run.
pub async fn download(client: &reqwest::Client, url: &str, dest: &Path) -> Result<()> {
    let url = Url::parse(url)?;
    log::info!("Downloading {}", url);

    let response = client.get(url.clone()).send().await?;
    if !response.status().is_success() {
        return Err(Error::DownloadFailed {
            url: url.into(),
            status: response.status().as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    tokio::fs::write(dest, &bytes)
        .await
        .fs_context("writing download to", dest)?;
    Ok(())
}
