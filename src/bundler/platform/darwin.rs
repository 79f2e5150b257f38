//! macOS app bundle finalization.

use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::utils::fs;
use std::path::Path;

/// Rearranges the raw binary into `<App>.app/Contents/MacOS/<App>` and
/// synthesizes the bundle manifest.
///
/// When an icon is configured it is copied into `Contents/Resources` under
/// the app's name, preserving its extension.
pub async fn finalize(
    app_name: &str,
    environment_path: &Path,
    binary_path: &Path,
    icon: Option<&Path>,
) -> Result<()> {
    let contents_path = environment_path
        .join(format!("{app_name}.app"))
        .join("Contents");
    let macos_path = contents_path.join("MacOS");
    log::debug!("Creating {}", macos_path.display());
    fs::create_dir_all(&macos_path, false).await?;

    let macos_binary_path = macos_path.join(app_name);
    log::debug!(
        "Moving {} to {}",
        binary_path.display(),
        macos_binary_path.display()
    );
    fs::move_file(binary_path, &macos_binary_path).await?;
    fs::set_executable(&macos_binary_path).await?;

    let mut icon_file = None;
    if let Some(icon) = icon {
        let resources_path = contents_path.join("Resources");
        log::debug!("Creating {}", resources_path.display());
        fs::create_dir_all(&resources_path, false).await?;

        let name = icon_file_name(app_name, icon);
        let icon_destination = resources_path.join(&name);
        log::debug!(
            "Copying {} to {}",
            icon.display(),
            icon_destination.display()
        );
        fs::copy_file(icon, &icon_destination).await?;
        icon_file = Some(name);
    }

    let plist_path = contents_path.join("Info.plist");
    log::debug!("Adding Info.plist to {}", plist_path.display());
    tokio::fs::write(&plist_path, info_plist(app_name, icon_file.as_deref()))
        .await
        .fs_context("writing Info.plist to", &plist_path)
}

/// Icon file name inside `Contents/Resources`, preserving the source
/// extension.
fn icon_file_name(app_name: &str, icon: &Path) -> String {
    match icon.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{app_name}.{ext}"),
        None => app_name.to_string(),
    }
}

/// Renders the bundle manifest.
///
/// The icon entry is only emitted when an icon was configured.
fn info_plist(app_name: &str, icon_file: Option<&str>) -> String {
    let icon_entry = match icon_file {
        Some(name) => format!("\t\t<key>CFBundleIconFile</key>\n\t\t<string>{name}</string>\n"),
        None => String::new(),
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
	<dict>
{icon_entry}		<key>CFBundleDisplayName</key>
		<string>{app_name}</string>
		<key>CFBundleExecutable</key>
		<string>{app_name}</string>
		<key>CFBundleName</key>
		<string>{app_name}</string>
		<key>CFBundleIdentifier</key>
		<string>com.{app_name}</string>
	</dict>
</plist>"#
    )
}
