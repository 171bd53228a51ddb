//! The configure operation: probe, snapshot, write `config.h`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::confgen::{ConfigWriter, StalePolicy, WriteOutcome};
use crate::core::{BuildArgs, Capabilities, ConfigurationRecord, CoordPrecision, Platform, CONFIG_FILE};
use crate::profile::InstallLayout;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

use super::Resolved;

/// Inputs shared by every operation.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    /// Source tree the build runs from
    pub srcroot: PathBuf,
    pub platform: Platform,
    pub args: BuildArgs,
    /// Header path; relative paths are taken from `srcroot`
    pub header: PathBuf,
    pub stale: StalePolicy,
}

impl ConfigureOptions {
    /// Host platform, no arguments, `config.h` in `srcroot`.
    pub fn new(srcroot: impl Into<PathBuf>) -> Self {
        ConfigureOptions {
            srcroot: srcroot.into(),
            platform: Platform::host(),
            args: BuildArgs::new(),
            header: PathBuf::from(CONFIG_FILE),
            stale: StalePolicy::default(),
        }
    }

    /// Layer a loaded config file under the command-line arguments.
    pub fn from_config(srcroot: impl Into<PathBuf>, config: &Config, cli_args: BuildArgs) -> Result<Self> {
        let mut opts = ConfigureOptions::new(srcroot);

        if let Some(platform) = config.platform()? {
            opts.platform = platform;
        }
        if let Some(ref header) = config.configure.header {
            opts.header = header.clone();
        }
        if let Some(stale) = config.configure.stale {
            opts.stale = stale;
        }

        opts.args = config.build_args();
        opts.args.merge(cli_args);
        Ok(opts)
    }

    /// Load `~/.yafray/config.toml` and `<srcroot>/.yafray/config.toml`, or
    /// only `config_file` when one is given explicitly.
    pub fn load(srcroot: &Path, config_file: Option<&Path>, cli_args: BuildArgs) -> Result<Self> {
        let config = match config_file {
            Some(path) => Config::load(path)?,
            None => load_config(global_config_path().as_deref(), &project_config_path(srcroot)),
        };
        Self::from_config(srcroot, &config, cli_args)
    }

    /// Absolute location of the generated header.
    pub fn header_path(&self) -> PathBuf {
        self.srcroot.join(&self.header)
    }
}

/// Result of a configure run.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureReport {
    pub platform: Platform,
    pub layout: InstallLayout,
    pub capabilities: Capabilities,
    pub record: ConfigurationRecord,
    pub header: PathBuf,
    pub outcome: WriteOutcome,
}

/// Resolve capabilities and write the configuration header.
pub fn configure(opts: &ConfigureOptions) -> Result<ConfigureReport> {
    let Resolved {
        profile,
        capabilities,
    } = Resolved::new(opts);

    let layout = profile.install_layout();
    let record = ConfigurationRecord::new(
        &capabilities,
        layout.lib.display().to_string(),
        CoordPrecision::from_args(&opts.args),
    );

    let header = opts.header_path();
    let outcome = ConfigWriter::new(&header)
        .with_policy(opts.stale)
        .write_conf(&record, opts.platform)
        .with_context(|| format!("failed to configure for {}", opts.platform))?;

    Ok(ConfigureReport {
        platform: opts.platform,
        layout,
        capabilities,
        record,
        header,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Capability;
    use std::fs;
    use tempfile::TempDir;

    fn linux(srcroot: &Path) -> ConfigureOptions {
        let mut opts = ConfigureOptions::new(srcroot);
        opts.platform = Platform::Linux;
        opts
    }

    #[test]
    fn test_configure_writes_header() {
        let tmp = TempDir::new().unwrap();
        let mut opts = linux(tmp.path());
        opts.args = BuildArgs::new().with("prefix", "/opt/yafray");

        let report = configure(&opts).unwrap();
        assert_eq!(report.outcome, WriteOutcome::Created);
        assert_eq!(report.header, tmp.path().join("config.h"));

        let text = fs::read_to_string(&report.header).unwrap();
        assert!(text.contains("#define LIBPATH \"/opt/yafray/lib\"\n"));
        assert!(text.contains("#define HAVE_ZLIB 1\n"));
        assert!(text.contains("#define HAVE_PTHREAD 1\n"));
    }

    #[test]
    fn test_missing_exr_override_disables_feature() {
        let tmp = TempDir::new().unwrap();
        let mut opts = linux(tmp.path());
        opts.args = BuildArgs::new().with("exr_path", tmp.path().join("missing").to_string_lossy());

        let report = configure(&opts).unwrap();
        assert!(!report.record.have(Capability::Exr));
        assert!(!report.capabilities.libs().contains(&"IlmImf".to_string()));

        let text = fs::read_to_string(&report.header).unwrap();
        assert!(text.contains("#define HAVE_EXR 0\n"));
    }

    #[test]
    fn test_existing_header_keeps_first_run() {
        let tmp = TempDir::new().unwrap();
        let exr = tmp.path().join("exr");
        fs::create_dir_all(exr.join("include/OpenEXR")).unwrap();
        fs::write(exr.join("include/OpenEXR/half.h"), "").unwrap();

        let mut opts = linux(tmp.path());
        opts.args = BuildArgs::new().with("exr_path", exr.to_string_lossy());
        assert_eq!(configure(&opts).unwrap().outcome, WriteOutcome::Created);

        // The library disappears between runs.
        fs::remove_dir_all(&exr).unwrap();
        let second = configure(&opts).unwrap();
        assert_eq!(second.outcome, WriteOutcome::Stale);
        assert!(!second.record.have(Capability::Exr));

        let text = fs::read_to_string(opts.header_path()).unwrap();
        assert!(text.contains("#define HAVE_EXR 1\n"));
    }

    #[test]
    fn test_from_config_layers_cli_args() {
        let mut config = Config::default();
        config.configure.platform = Some("win32".into());
        config.configure.header = Some(PathBuf::from("include/config.h"));
        config.args.insert(
            "prefix".into(),
            crate::util::config::ArgValue::Str("/from/config".into()),
        );

        let cli = BuildArgs::new().with("prefix", "/from/cli").with("debug", "1");
        let opts = ConfigureOptions::from_config("/src", &config, cli).unwrap();

        assert_eq!(opts.platform, Platform::Win32);
        assert_eq!(opts.header_path(), PathBuf::from("/src/include/config.h"));
        assert_eq!(opts.args.get("prefix"), Some("/from/cli"));
        assert!(opts.args.debug());
        assert_eq!(opts.stale, StalePolicy::Keep);
    }
}
