//! Bundle configuration loading.

use super::Environment;
use crate::bundler::error::{ErrorExt, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The bundle configuration.
///
/// Deserialized from a JSON document (`bundler.json` in the working
/// directory by default). Immutable once handed to
/// [`Bundler::new`](crate::bundler::Bundler::new): all derived paths are
/// resolved there, exactly once.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Configuration {
    /// The app name as it should be displayed everywhere.
    ///
    /// Also injected at link time, so the bundled app can read it from its
    /// `main.AppName` variable.
    pub app_name: String,

    /// Where vendor archives are cached between runs.
    ///
    /// Best is to leave it empty: it defaults to a subdirectory of the
    /// system temp directory.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Environments the bundling should be done upon, in order.
    #[serde(default)]
    pub environments: Vec<Environment>,

    /// Path to the darwin icon (.icns), copied into the app bundle.
    #[serde(default)]
    pub icon_path_darwin: Option<PathBuf>,

    /// Path to the linux icon (.png).
    #[serde(default)]
    pub icon_path_linux: Option<PathBuf>,

    /// Path to the windows icon (.ico), embedded into the executable.
    #[serde(default)]
    pub icon_path_windows: Option<PathBuf>,

    /// The path of the project to bundle.
    ///
    /// Defaults to the working directory.
    #[serde(default)]
    pub input_path: Option<PathBuf>,

    /// The path bundles are written under.
    ///
    /// Defaults to the working directory.
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Toolchain binary used to compile the app.
    ///
    /// Defaults to `go`, resolved through `PATH`.
    #[serde(default)]
    pub toolchain_path: Option<PathBuf>,
}

impl Configuration {
    /// Loads a configuration from a JSON document.
    pub fn load(path: &Path) -> Result<Configuration> {
        let contents =
            std::fs::read_to_string(path).fs_context("reading configuration from", path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
