//! Main bundler orchestration and coordination.

use crate::bundler::builder::{compile, ldflags::Ldflags};
use crate::bundler::error::{Context, Error, Result};
use crate::bundler::platform;
use crate::bundler::resources;
use crate::bundler::settings::{Configuration, Environment, Os};
use crate::bundler::utils::fs;
use crate::bundler::vendor;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Directory under the system temp directory holding the default vendor
/// cache.
const DEFAULT_CACHE_DIR: &str = "appshell-bundler";

/// The bundling orchestrator.
///
/// Owns every configuration-derived path, resolved once at construction, and
/// drives the full sequence: reset → bind resources once → for each target
/// environment: validate OS → provision vendor archives → build ldflags →
/// invoke the toolchain → finalize for that OS.
///
/// Environments are processed one at a time, in configuration order; the
/// first failing step aborts the whole bundle call, leaving the output of
/// already-completed environments on disk.
///
/// # Examples
///
/// ```no_run
/// use appshell_bundler::bundler::{Bundler, Configuration};
///
/// # async fn example() -> appshell_bundler::bundler::Result<()> {
/// let configuration = Configuration {
///     app_name: "MyApp".into(),
///     ..Default::default()
/// };
/// let bundler = Bundler::new(&configuration)?;
/// bundler.bundle().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    app_name: String,
    client: reqwest::Client,
    environments: Vec<Environment>,
    path_build: String,
    path_cache: PathBuf,
    path_icon_darwin: Option<PathBuf>,
    path_icon_windows: Option<PathBuf>,
    path_input: PathBuf,
    path_output: PathBuf,
    path_resources: PathBuf,
    path_vendor: PathBuf,
    toolchain: PathBuf,
}

impl Bundler {
    /// Builds a new bundler based on a configuration.
    ///
    /// Validates every environment's OS against the supported set, resolves
    /// every configured path to an absolute one and computes the derived
    /// paths. No filesystem writes happen here.
    ///
    /// # Errors
    ///
    /// Returns an invalid-OS error for the first environment naming an OS
    /// outside the supported set; no environment is silently dropped.
    pub fn new(c: &Configuration) -> Result<Bundler> {
        for environment in &c.environments {
            if Os::parse(&environment.os).is_none() {
                return Err(Error::InvalidOs(environment.os.clone()));
            }
        }

        let path_cache = match &c.cache_path {
            Some(path) => absolutize(path)?,
            None => std::env::temp_dir().join(DEFAULT_CACHE_DIR),
        };
        let path_input = match &c.input_path {
            Some(path) => absolutize(path)?,
            None => current_dir()?,
        };
        let path_output = match &c.output_path {
            Some(path) => absolutize(path)?,
            None => current_dir()?,
        };

        // Paths that depend on the input path
        let path_build = compile::build_path(&path_input)?;
        let path_resources = path_input.join("resources");
        let path_vendor = path_input.join("vendor");

        Ok(Bundler {
            app_name: c.app_name.clone(),
            client: reqwest::Client::new(),
            environments: c.environments.clone(),
            path_build,
            path_cache,
            path_icon_darwin: c.icon_path_darwin.as_deref().map(absolutize).transpose()?,
            path_icon_windows: c.icon_path_windows.as_deref().map(absolutize).transpose()?,
            path_input,
            path_output,
            path_resources,
            path_vendor,
            toolchain: c
                .toolchain_path
                .clone()
                .unwrap_or_else(|| PathBuf::from("go")),
        })
    }

    /// Bundles the app for every configured environment, in order.
    pub async fn bundle(&self) -> Result<()> {
        log::debug!("Resetting");
        self.reset().await.context("resetting bundler failed")?;

        // Embedded resources are OS and arch independent, bind them once for
        // the whole call.
        log::debug!("Binding resources");
        self.bind_resources()
            .await
            .context("binding resources failed")?;

        for environment in &self.environments {
            log::debug!(
                "Bundling for environment {}/{}",
                environment.os,
                environment.arch
            );
            self.bundle_environment(environment).await.with_context(|| {
                format!(
                    "bundling for environment {}/{} failed",
                    environment.os, environment.arch
                )
            })?;
        }
        Ok(())
    }

    /// Regenerates the embedded resource source.
    pub async fn bind_resources(&self) -> Result<()> {
        resources::bind(&self.path_input, &self.path_resources).await
    }

    /// Removes the vendor archive cache.
    pub async fn clear_cache(&self) -> Result<()> {
        log::debug!("Removing {}", self.path_cache.display());
        fs::remove_dir_all(&self.path_cache).await
    }

    /// Returns the app name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the resolved output path.
    pub fn output_path(&self) -> &Path {
        &self.path_output
    }

    /// Returns the resolved cache path.
    pub fn cache_path(&self) -> &Path {
        &self.path_cache
    }

    /// Makes sure the minimal paths exist.
    async fn reset(&self) -> Result<()> {
        for path in [&self.path_cache, &self.path_output] {
            log::debug!("Creating {}", path.display());
            fs::create_dir_all(path, false).await?;
        }
        Ok(())
    }

    /// Returns the staging directory for an environment.
    ///
    /// Derived on demand, never stored on the bundler.
    fn environment_path(&self, environment: &Environment) -> PathBuf {
        self.path_output
            .join(format!("{}-{}", environment.os, environment.arch))
    }

    /// Runs the provision → build → finalize sequence for one environment.
    async fn bundle_environment(&self, environment: &Environment) -> Result<()> {
        // Re-checked per environment so a bad OS writes nothing for it.
        let os = Os::parse(&environment.os)
            .ok_or_else(|| Error::InvalidOs(environment.os.clone()))?;

        let environment_path = self.environment_path(environment);
        log::debug!("Recreating {}", environment_path.display());
        fs::create_dir_all(&environment_path, true).await?;

        vendor::provision(
            &self.client,
            &self.path_cache,
            &self.path_vendor,
            environment,
        )
        .await
        .context("provisioning the vendor failed")?;

        if os == Os::Windows {
            platform::windows::embed_icon(
                &self.path_input,
                self.path_icon_windows.as_deref(),
                &environment.arch,
            )
            .await
            .context("embedding the windows icon failed")?;
        }

        let mut ldflags = Ldflags::new();
        ldflags.push("X", format!("\"main.AppName={}\"", self.app_name));
        ldflags.push("X", format!("\"main.BuiltAt={}\"", chrono::Local::now()));
        if os == Os::Windows {
            // GUI-only windowing, no console subsystem
            ldflags.push("H", "windowsgui");
        }

        log::debug!(
            "Building for os {} and arch {}",
            environment.os,
            environment.arch
        );
        let binary_path = environment_path.join("binary");
        compile::compile(
            &self.toolchain,
            &self.path_build,
            environment,
            &ldflags.render(),
            &binary_path,
        )
        .await?;

        platform::finalize(
            &environment.os,
            &self.app_name,
            &environment_path,
            &binary_path,
            self.path_icon_darwin.as_deref(),
        )
        .await
    }
}

/// Resolves a path to an absolute one against the working directory.
fn absolutize(path: &Path) -> Result<PathBuf> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(Error::from)
        .with_context(|| format!("resolving {} failed", path.display()))
}

/// Returns the working directory.
fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(Error::from)
        .context("getting the working directory failed")
}
