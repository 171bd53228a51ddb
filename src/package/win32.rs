//! Win32 installer script generation.
//!
//! The installer compiler is run by hand; this step only instantiates the
//! script template with the staging directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use regex::Regex;

use crate::profile::BuildEnvironment;
use crate::util::fs::{remove_file_if_exists, replace_in_file};

use super::Packager;

const TEMPLATE: &str = "yafray_win_iss.tmpl";
const SCRIPT: &str = "yafray_win.iss";

/// Placeholder in the template replaced by the staging directory.
const SRCROOT_PLACEHOLDER: &str = "SRCROOT";

/// Renders `yafray_win.iss` from its template.
#[derive(Debug, Clone)]
pub struct Win32Installer {
    staging: PathBuf,
}

impl Win32Installer {
    pub fn new(staging: impl Into<PathBuf>) -> Self {
        Win32Installer {
            staging: staging.into(),
        }
    }

    fn template(&self) -> PathBuf {
        self.staging.join(TEMPLATE)
    }
}

impl Packager for Win32Installer {
    fn artifact(&self) -> PathBuf {
        self.staging.join(SCRIPT)
    }

    fn staging_dir(&self) -> PathBuf {
        self.staging.clone()
    }

    fn package(&self, target: &Path, _sources: &[PathBuf], _env: &BuildEnvironment) -> Result<()> {
        tracing::info!("building Win32 installer ...");

        let template = self.template();
        if !template.is_file() {
            bail!("installer template not found: {}", template.display());
        }

        remove_file_if_exists(target)?;

        let placeholder = Regex::new(SRCROOT_PLACEHOLDER).context("invalid placeholder pattern")?;
        let staging = self.staging.display().to_string();
        replace_in_file(&[(placeholder, staging)], &template, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuildArgs, Capabilities};
    use crate::profile::Win32Profile;
    use std::fs;
    use tempfile::TempDir;

    fn env() -> BuildEnvironment {
        let args = BuildArgs::new();
        let profile = Win32Profile::init(Path::new("/src"), &args);
        BuildEnvironment::common(&profile, &args, &Capabilities::new())
    }

    #[test]
    fn test_renders_script() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("win32pak");
        fs::create_dir_all(&staging).unwrap();
        fs::write(
            staging.join(TEMPLATE),
            "[Files]\nSource: \"SRCROOT\\yafray.exe\"; DestDir: \"{app}\"\n",
        )
        .unwrap();
        fs::write(staging.join(SCRIPT), "old").unwrap();

        let installer = Win32Installer::new(&staging);
        installer.package(&installer.artifact(), &[], &env()).unwrap();

        let script = fs::read_to_string(staging.join(SCRIPT)).unwrap();
        assert_eq!(
            script,
            format!(
                "[Files]\nSource: \"{}\\yafray.exe\"; DestDir: \"{{app}}\"\n",
                staging.display()
            )
        );
    }

    #[test]
    fn test_missing_template() {
        let tmp = TempDir::new().unwrap();
        let installer = Win32Installer::new(tmp.path());
        assert!(installer.package(&installer.artifact(), &[], &env()).is_err());
    }
}
