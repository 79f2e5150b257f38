//! Toolchain invocation and build identifier derivation.

use crate::bail;
use crate::bundler::error::{Error, Result};
use crate::bundler::settings::Environment;
use std::path::{Component, Path};
use tokio::process::Command;

/// Derives the identifier the toolchain compiles, from the absolute project
/// path.
///
/// The identifier is the path's last three components joined by `/`, the
/// project path relative to the toolchain's source root. Fewer than three
/// components is an error.
pub fn build_path(input_path: &Path) -> Result<String> {
    let components: Vec<String> = input_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if components.len() < 3 {
        bail!(
            "build path of {} requires at least three components",
            input_path.display()
        );
    }
    Ok(components[components.len() - 3..].join("/"))
}

/// Compiles the application for one environment.
///
/// Sets the cross-compilation environment variables for the target OS and
/// arch and captures combined standard output and standard error; a non-zero
/// exit status surfaces that output verbatim. No retry, and no partial
/// binary is considered usable.
pub async fn compile(
    toolchain: &Path,
    build_path: &str,
    environment: &Environment,
    ldflags: &str,
    binary_path: &Path,
) -> Result<()> {
    let mut command = Command::new(toolchain);
    command
        .arg("build")
        .arg("-ldflags")
        .arg(ldflags)
        .arg("-o")
        .arg(binary_path)
        .arg(build_path)
        .env("GOOS", &environment.os)
        .env("GOARCH", &environment.arch);

    log::debug!("Executing {:?}", command.as_std());
    let output = command.output().await.map_err(|error| Error::CommandFailed {
        command: toolchain.display().to_string(),
        error,
    })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(Error::BuildFailed {
            environment: format!("{}/{}", environment.os, environment.arch),
            output: combined,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn build_path_requires_three_components() {
        assert!(build_path(&PathBuf::from("/1/2")).is_err());
    }

    #[test]
    fn build_path_keeps_a_three_component_path() {
        assert_eq!(build_path(&PathBuf::from("/1/2/3")).unwrap(), "1/2/3");
    }

    #[test]
    fn build_path_takes_the_last_three_components() {
        assert_eq!(build_path(&PathBuf::from("/1/2/3/4")).unwrap(), "2/3/4");
    }
}
