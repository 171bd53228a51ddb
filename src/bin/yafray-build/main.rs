//! yafray-build CLI - configure the yafray renderer build

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("yafray_build=debug")
    } else {
        EnvFilter::new("yafray_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let global = cli.global();

    // Execute command
    match cli.command {
        Commands::Configure(args) => commands::configure::execute(&global, args),
        Commands::Flags(args) => commands::flags::execute(&global, args),
        Commands::Package(args) => commands::package::execute(&global, args),
    }
}
