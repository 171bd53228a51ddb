//! Configuration file support for yafray-build.
//!
//! yafray-build supports two configuration file locations:
//! - Global: `~/.yafray/config.toml` - User-wide defaults
//! - Project: `.yafray/config.toml` - Source-tree overrides
//!
//! Project config takes precedence over global config, and `KEY=VALUE`
//! arguments given on the command line take precedence over both.
//!
//! ```toml
//! [args]
//! prefix = "/opt/yafray"
//! debug = true
//! exr_path = "/opt/openexr"
//!
//! [configure]
//! platform = "linux"
//! header = "config.h"
//! stale = "regenerate"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::confgen::StalePolicy;
use crate::core::{BuildArgs, Platform};

/// yafray-build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// User arguments, as if given as `KEY=VALUE`
    pub args: BTreeMap<String, ArgValue>,

    /// Configure step settings
    pub configure: ConfigureConfig,
}

/// An argument value as written in TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ArgValue {
    fn into_arg_string(self) -> String {
        match self {
            ArgValue::Bool(true) => "1".to_string(),
            ArgValue::Bool(false) => "0".to_string(),
            ArgValue::Int(i) => i.to_string(),
            ArgValue::Str(s) => s,
        }
    }
}

/// Configure step settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigureConfig {
    /// Platform family to configure for (defaults to the host)
    pub platform: Option<String>,

    /// Path of the generated header, relative to the source root
    pub header: Option<PathBuf>,

    /// What to do with an existing header that no longer matches
    pub stale: Option<StalePolicy>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.args.extend(other.args);

        if other.configure.platform.is_some() {
            self.configure.platform = other.configure.platform;
        }
        if other.configure.header.is_some() {
            self.configure.header = other.configure.header;
        }
        if other.configure.stale.is_some() {
            self.configure.stale = other.configure.stale;
        }
    }

    /// The `[args]` table as a [`BuildArgs`] mapping.
    pub fn build_args(&self) -> BuildArgs {
        self.args
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into_arg_string()))
            .collect()
    }

    /// Parse the configured platform, if any.
    pub fn platform(&self) -> Result<Option<Platform>> {
        self.configure
            .platform
            .as_deref()
            .map(|p| p.parse::<Platform>())
            .transpose()
            .context("invalid `configure.platform` in config")
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.yafray/config.toml)
/// 2. Global config (~/.yafray/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path.filter(|p| p.exists()) {
        config.merge(Config::load_or_default(global));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.yafray).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".yafray"))
}

/// Get the global config path (~/.yafray/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.yafray/config.toml).
pub fn project_config_path(srcroot: &Path) -> PathBuf {
    srcroot.join(".yafray").join("config.toml")
}
