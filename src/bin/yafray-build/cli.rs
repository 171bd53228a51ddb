//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use yafray_build::{Platform, StalePolicy};

/// yafray-build - platform configuration for the yafray renderer build
#[derive(Parser)]
#[command(name = "yafray-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Platform family to configure for (linux, darwin, win32)
    #[arg(long, global = true, env = "YAFRAY_PLATFORM")]
    pub platform: Option<Platform>,

    /// Read settings from this file instead of the default config locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Source root of the renderer (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub srcroot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
pub struct GlobalArgs {
    pub platform: Option<Platform>,
    pub config_file: Option<PathBuf>,
    pub srcroot: Option<PathBuf>,
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            platform: self.platform,
            config_file: self.config_file.clone(),
            srcroot: self.srcroot.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe libraries and write config.h
    Configure(ConfigureArgs),

    /// Show compiler and linker settings for each build product
    Flags(FlagsArgs),

    /// Run the platform packaging step
    Package(PackageArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Replace an existing config.h that no longer matches
    #[arg(long)]
    pub regenerate: bool,

    /// What to do with a config.h that no longer matches (keep, regenerate)
    #[arg(long, value_name = "POLICY", conflicts_with = "regenerate")]
    pub stale: Option<StalePolicy>,

    /// Build arguments (e.g. prefix=/opt/yafray debug=1)
    #[arg(value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Build arguments (e.g. arch=pentium4 debug=1)
    #[arg(value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct PackageArgs {
    /// Build arguments
    #[arg(value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}
