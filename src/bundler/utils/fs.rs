//! File system utilities for bundling.
//!
//! Safe file operations with automatic parent directory creation and path
//! context on every error.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if
/// specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Moves a file, creating any parent directories of the destination path as
/// necessary.
///
/// Falls back to copy-and-remove when a plain rename cannot cross
/// filesystems.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to).await.fs_context("copying file to", to)?;
            fs::remove_file(from)
                .await
                .fs_context("removing file", from)?;
            Ok(())
        }
    }
}

/// Marks a file as executable by everyone. No-op outside unix.
pub async fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("chmoding", path)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remove_dir_all_tolerates_a_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        remove_dir_all(&temp.path().join("does-not-exist"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn copy_file_creates_destination_parents() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src.txt");
        tokio::fs::write(&src, b"contents").await.unwrap();

        let dst = temp.path().join("a/b/dst.txt");
        copy_file(&src, &dst).await.unwrap();

        assert_eq!(tokio::fs::read(&dst).await.unwrap(), b"contents");
        assert!(src.exists());
    }

    #[tokio::test]
    async fn copy_file_rejects_a_directory_source() {
        let temp = tempfile::tempdir().unwrap();
        let dst = temp.path().join("dst");
        assert!(copy_file(temp.path(), &dst).await.is_err());
    }

    #[tokio::test]
    async fn move_file_removes_the_source() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src.txt");
        tokio::fs::write(&src, b"contents").await.unwrap();

        let dst = temp.path().join("nested/dst.txt");
        move_file(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert_eq!(tokio::fs::read(&dst).await.unwrap(), b"contents");
    }
}
