//! Command implementations

pub mod configure;
pub mod flags;
pub mod package;

use anyhow::{Context, Result};
use yafray_build::ops::ConfigureOptions;
use yafray_build::BuildArgs;

use crate::cli::GlobalArgs;

/// Assemble operation options from config files, global flags and the
/// trailing `KEY=VALUE` arguments.
pub fn load_options(global: &GlobalArgs, pairs: &[String]) -> Result<ConfigureOptions> {
    let srcroot = match global.srcroot {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };

    let cli_args = BuildArgs::from_pairs(pairs)?;
    let mut opts = ConfigureOptions::load(&srcroot, global.config_file.as_deref(), cli_args)?;
    if let Some(platform) = global.platform {
        opts.platform = platform;
    }
    Ok(opts)
}
