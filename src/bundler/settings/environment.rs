//! Target environment types.

use serde::Deserialize;
use std::fmt;

/// Operating systems the bundler can produce bundles for.
///
/// This is a closed set: any other identifier in a configuration is rejected
/// when the bundler is constructed, and again when finalization dispatches on
/// it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Os {
    /// macOS, bundled as an `.app` directory
    Darwin,
    /// Linux, bundled as a flat binary
    Linux,
    /// Windows, bundled as an `.exe` with an optional embedded icon
    Windows,
}

impl Os {
    /// All supported operating systems.
    pub const ALL: [Os; 3] = [Os::Darwin, Os::Linux, Os::Windows];

    /// Parses an OS identifier, returning `None` for values outside the
    /// supported set.
    pub fn parse(s: &str) -> Option<Os> {
        match s {
            "darwin" => Some(Os::Darwin),
            "linux" => Some(Os::Linux),
            "windows" => Some(Os::Windows),
            _ => None,
        }
    }

    /// Returns the identifier used in configurations and output paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
            Os::Windows => "windows",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A target (operating system, architecture) pair to bundle for.
///
/// The OS must name a member of [`Os`]; the architecture uses the
/// toolchain's identifiers (`amd64`, `arm64`, `386`, ...) and is passed
/// through unvalidated.
#[derive(Clone, Debug, Deserialize)]
pub struct Environment {
    /// Target operating system (`darwin`, `linux` or `windows`)
    pub os: String,
    /// Target architecture
    pub arch: String,
}

/// Returns the host operating system under its configuration identifier.
pub fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// Returns the host architecture under the toolchain's identifier.
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}
