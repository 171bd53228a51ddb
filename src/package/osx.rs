//! OS X installer package via Apple's PackageMaker.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::profile::BuildEnvironment;
use crate::util::fs::{prune_matching, remove_dir_all_if_exists, remove_file_if_exists};
use crate::util::process::{find_executable, ProcessBuilder};

use super::{report_status, Packager};

/// Where the developer tools install PackageMaker.
pub const PACKAGE_MAKER: &str =
    "/Developer/Applications/Utilities/PackageMaker.app/Contents/MacOS/PackageMaker";

/// Staging tree as checked out from version control.
const CHECKOUT_DIR: &str = "osxpak";
/// Staging tree after version-control metadata is stripped.
const STAGING_DIR: &str = "osxpaknocvs";

/// Entries stripped from the staging tree before packaging.
const PRUNE_PATTERNS: [&str; 2] = ["CVS", "sconsign"];

/// Builds `yafray-<version>.pkg` and zips it.
#[derive(Debug, Clone)]
pub struct OsxPackager {
    srcroot: PathBuf,
    version: String,
}

impl OsxPackager {
    pub fn new(srcroot: &Path, version: &str) -> Self {
        OsxPackager {
            srcroot: srcroot.to_path_buf(),
            version: version.to_string(),
        }
    }

    fn package_name(&self) -> String {
        format!("yafray-{}.pkg", self.version)
    }

    fn package_maker(&self) -> PathBuf {
        let bundled = PathBuf::from(PACKAGE_MAKER);
        if bundled.exists() {
            return bundled;
        }
        find_executable("PackageMaker").unwrap_or(bundled)
    }

    /// PackageMaker arguments for building `target` from the staging tree.
    pub fn package_maker_command(&self, target: &Path) -> ProcessBuilder {
        let pak = self.staging_dir();
        ProcessBuilder::new(self.package_maker())
            .arg("-build")
            .arg("-p")
            .arg(target)
            .arg("-f")
            .arg(pak.join("Package_Root"))
            .arg("-r")
            .arg(pak.join("Resources"))
            .arg("-i")
            .arg(pak.join("yafray.info"))
            .arg("-d")
            .arg(pak.join("yafraydes.plist"))
            .cwd(&self.srcroot)
    }

    /// Rename a fresh checkout's staging tree into place.
    fn adopt_checkout(&self) -> Result<()> {
        let checkout = self.srcroot.join(CHECKOUT_DIR);
        let staging = self.staging_dir();
        if checkout.is_dir() && !staging.exists() {
            std::fs::rename(&checkout, &staging).with_context(|| {
                format!(
                    "failed to rename {} to {}",
                    checkout.display(),
                    staging.display()
                )
            })?;
        }
        Ok(())
    }
}

impl Packager for OsxPackager {
    fn artifact(&self) -> PathBuf {
        self.srcroot.join(self.package_name())
    }

    fn staging_dir(&self) -> PathBuf {
        self.srcroot.join(STAGING_DIR)
    }

    fn package(&self, target: &Path, _sources: &[PathBuf], _env: &BuildEnvironment) -> Result<()> {
        tracing::info!("building OS X package ...");
        self.adopt_checkout()?;

        let pak = self.staging_dir();
        for pattern in PRUNE_PATTERNS {
            let re = Regex::new(pattern).context("invalid prune pattern")?;
            prune_matching(&pak, &re)?;
        }

        let zip_name = format!("{}.zip", self.package_name());
        remove_dir_all_if_exists(target)?;
        remove_file_if_exists(&self.srcroot.join(&zip_name))?;

        let status = self.package_maker_command(target).status()?;
        report_status("PackageMaker", status);

        let status = ProcessBuilder::new("zip")
            .arg("-r")
            .arg(&zip_name)
            .arg(self.package_name())
            .cwd(&self.srcroot)
            .status()?;
        report_status("zip", status);

        Ok(())
    }
}
