//! `yafray-build configure` command

use anyhow::Result;

use crate::cli::{ConfigureArgs, GlobalArgs};
use yafray_build::ops::configure;
use yafray_build::{StalePolicy, WriteOutcome};

pub fn execute(global: &GlobalArgs, args: ConfigureArgs) -> Result<()> {
    let mut opts = super::load_options(global, &args.args)?;
    if args.regenerate {
        opts.stale = StalePolicy::Regenerate;
    } else if let Some(stale) = args.stale {
        opts.stale = stale;
    }

    let report = configure(&opts)?;

    eprintln!("  Configured for {}", report.platform);
    for result in report.capabilities.iter() {
        let status = if result.present { "yes" } else { "no" };
        eprintln!("    {:<8} {}", result.capability.name(), status);
    }
    eprintln!("    libpath  {}", report.layout.lib.display());

    match report.outcome {
        WriteOutcome::Created => eprintln!("     Created {}", report.header.display()),
        WriteOutcome::Reused => eprintln!("       Using {}", report.header.display()),
        WriteOutcome::Stale => eprintln!(
            "       Using {} (stale, rerun with --regenerate to refresh)",
            report.header.display()
        ),
        WriteOutcome::Regenerated => eprintln!(" Regenerated {}", report.header.display()),
    }

    Ok(())
}
