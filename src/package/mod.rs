//! Post-build packaging.
//!
//! Packaging itself is done by external tools. This module only defines
//! the invocation contract and the platform packagers that shell out.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::profile::BuildEnvironment;

pub mod osx;
pub mod win32;

/// Trait for packaging tool invocations.
pub trait Packager: Send + Sync {
    /// The artifact this packager produces.
    fn artifact(&self) -> PathBuf;

    /// The staging directory whose contents make up the package.
    fn staging_dir(&self) -> PathBuf;

    /// Produce `target` from `sources`.
    ///
    /// Tool exit statuses are reported but not interpreted; only failures
    /// to run a tool at all are returned as errors.
    fn package(&self, target: &Path, sources: &[PathBuf], env: &BuildEnvironment) -> Result<()>;
}

/// A named packaging step declared by a platform profile.
pub struct PackageRule {
    pub name: &'static str,
    packager: Box<dyn Packager>,
}

impl PackageRule {
    pub fn new(name: &'static str, packager: impl Packager + 'static) -> Self {
        PackageRule {
            name,
            packager: Box::new(packager),
        }
    }

    pub fn packager(&self) -> &dyn Packager {
        self.packager.as_ref()
    }

    /// Run the packager for its default artifact.
    pub fn run(&self, sources: &[PathBuf], env: &BuildEnvironment) -> Result<PathBuf> {
        let target = self.packager.artifact();
        tracing::info!("Packaging {} ({} files)", target.display(), sources.len());
        self.packager.package(&target, sources, env)?;
        Ok(target)
    }
}

impl fmt::Debug for PackageRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageRule")
            .field("name", &self.name)
            .field("artifact", &self.packager.artifact())
            .finish()
    }
}

/// Log a packaging tool's exit status.
pub(crate) fn report_status(tool: &str, status: std::process::ExitStatus) {
    if status.success() {
        tracing::debug!("{} finished", tool);
    } else {
        tracing::warn!("{} exited with {}", tool, status);
    }
}
