//! Target platform families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The platform family a build is configured for.
///
/// Selected once per run and passed down by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Unix-style prefix tree (Linux and other Unix hosts)
    Linux,
    /// OS X package staging tree
    Darwin,
    /// Flat Win32 installer staging directory
    Win32,
}

impl Platform {
    /// Detect the platform family of the host.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::Darwin,
            "windows" => Platform::Win32,
            _ => Platform::Linux,
        }
    }

    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Win32 => "win32",
        }
    }

    /// Compiler identity macro written into `config.h`.
    ///
    /// Chosen by platform family, not by the compiler actually found.
    pub fn compiler_macro(&self) -> &'static str {
        match self {
            Platform::Win32 => "MSVC",
            Platform::Linux | Platform::Darwin => "GCC",
        }
    }

    /// Whether shared components need dllexport/dllimport decoration.
    pub fn exports_linkage(&self) -> bool {
        matches!(self, Platform::Win32)
    }

    /// Whether the toolchain takes MSVC-style command-line flags.
    pub fn msvc_style(&self) -> bool {
        matches!(self, Platform::Win32)
    }

    /// Default suffix for shared libraries before any profile override.
    pub fn shlib_suffix(&self) -> &'static str {
        match self {
            Platform::Linux | Platform::Darwin => ".so",
            Platform::Win32 => ".dll",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown platform name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown platform `{0}` (expected linux, darwin or win32)")]
pub struct PlatformParseError(pub String);

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" | "posix" => Ok(Platform::Linux),
            "darwin" | "macos" | "osx" => Ok(Platform::Darwin),
            "win32" | "windows" => Ok(Platform::Win32),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}
