//! Run the platform's packaging rule.

use std::path::PathBuf;

use anyhow::Result;

use crate::profile::BuildEnvironment;
use crate::util::fs::glob_files;

use super::{ConfigureOptions, Resolved};

/// What the package operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageReport {
    /// The platform has no packaging step.
    NoRule,
    /// The named rule produced `artifact`.
    Packaged { rule: &'static str, artifact: PathBuf },
}

/// Package the staged build, if the platform defines a packaging rule.
pub fn package(opts: &ConfigureOptions) -> Result<PackageReport> {
    let Resolved {
        profile,
        capabilities,
    } = Resolved::new(opts);

    let Some(rule) = profile.package_rule(&opts.args) else {
        tracing::info!("{} has no packaging step", opts.platform);
        return Ok(PackageReport::NoRule);
    };

    let staging = rule.packager().staging_dir();
    let sources = glob_files(&staging, &["**/*".to_string()])?;
    let env = profile.derive_program_env(&BuildEnvironment::common(
        profile.as_ref(),
        &opts.args,
        &capabilities,
    ));

    let artifact = rule.run(&sources, &env)?;
    Ok(PackageReport::Packaged {
        rule: rule.name,
        artifact,
    })
}
