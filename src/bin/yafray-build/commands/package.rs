//! `yafray-build package` command

use anyhow::Result;

use crate::cli::{GlobalArgs, PackageArgs};
use yafray_build::ops::{package, PackageReport};

pub fn execute(global: &GlobalArgs, args: PackageArgs) -> Result<()> {
    let opts = super::load_options(global, &args.args)?;

    match package(&opts)? {
        PackageReport::NoRule => eprintln!("  Nothing to package for {}", opts.platform),
        PackageReport::Packaged { rule, artifact } => {
            eprintln!("    Packaged {} ({})", artifact.display(), rule)
        }
    }
    Ok(())
}
