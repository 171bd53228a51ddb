//! Write-once generation of the configuration header.
//!
//! An existing header is reused as is. Before reusing it, its content hash
//! is compared with what the current capability set would produce, so a
//! header left over from a run with different libraries is reported as
//! stale. Whether a stale header is replaced is governed by
//! [`StalePolicy`]; by default it is kept. A header that cannot be read
//! back counts as stale.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ConfigurationRecord, Platform};
use crate::util::fs::write_atomic;
use crate::util::hash::{sha256_bytes, sha256_str};

use super::header::render_header;

/// What to do when an existing header no longer matches the inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Leave the file untouched and warn.
    #[default]
    Keep,
    /// Replace the file with freshly rendered content.
    Regenerate,
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(StalePolicy::Keep),
            "regenerate" => Ok(StalePolicy::Regenerate),
            _ => Err(format!("unknown stale policy `{}` (expected keep or regenerate)", s)),
        }
    }
}

/// Outcome of [`ConfigWriter::write_conf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    /// No header existed; a new one was written.
    Created,
    /// The existing header matches the current inputs.
    Reused,
    /// The existing header differs from the current inputs and was kept.
    Stale,
    /// The existing header differed and was replaced.
    Regenerated,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WriteOutcome::Created => "created",
            WriteOutcome::Reused => "reused",
            WriteOutcome::Stale => "stale",
            WriteOutcome::Regenerated => "regenerated",
        };
        write!(f, "{}", s)
    }
}

/// Error while writing the configuration header.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write config file `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// The underlying filesystem error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            ConfigError::Write { source, .. } => source,
        }
    }
}

/// Writes the configuration header at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigWriter {
    path: PathBuf,
    policy: StalePolicy,
}

impl ConfigWriter {
    /// Create a writer for `path` with the default [`StalePolicy::Keep`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigWriter {
            path: path.into(),
            policy: StalePolicy::default(),
        }
    }

    /// Set the stale-header policy.
    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Write the header unless one already exists.
    ///
    /// The content is composed in memory and moved into place in one
    /// rename, so no reader ever sees a half-written file.
    pub fn write_conf(
        &self,
        record: &ConfigurationRecord,
        platform: Platform,
    ) -> Result<WriteOutcome, ConfigError> {
        let rendered = render_header(record, platform);

        if !self.path.exists() {
            tracing::info!("Creating config file: {}", self.path.display());
            self.store(&rendered, false)?;
            return Ok(WriteOutcome::Created);
        }

        tracing::info!("Using config file: {}", self.path.display());

        match std::fs::read(&self.path) {
            Ok(existing) if sha256_bytes(&existing) == sha256_str(&rendered) => {
                return Ok(WriteOutcome::Reused);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("could not read {}: {}", self.path.display(), e);
            }
        }

        match self.policy {
            StalePolicy::Keep => {
                tracing::warn!(
                    "{} does not match the current configuration; delete it or regenerate to refresh",
                    self.path.display()
                );
                Ok(WriteOutcome::Stale)
            }
            StalePolicy::Regenerate => {
                tracing::info!("Regenerating stale config file: {}", self.path.display());
                self.store(&rendered, true)?;
                Ok(WriteOutcome::Regenerated)
            }
        }
    }

    fn store(&self, contents: &str, clobber: bool) -> Result<(), ConfigError> {
        write_atomic(&self.path, contents.as_bytes(), clobber).map_err(|source| {
            ConfigError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Capabilities, Capability, CapabilityResult, CoordPrecision};
    use std::fs;
    use tempfile::TempDir;

    fn record(exr: bool) -> ConfigurationRecord {
        let exr = if exr {
            CapabilityResult::found(Capability::Exr)
        } else {
            CapabilityResult::absent(Capability::Exr)
        };
        let caps: Capabilities = [CapabilityResult::found(Capability::Zlib), exr]
            .into_iter()
            .collect();
        ConfigurationRecord::new(&caps, "/usr/local/lib", CoordPrecision::Single)
    }

    #[test]
    fn test_second_write_is_noop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");
        let writer = ConfigWriter::new(&path);

        assert_eq!(writer.write_conf(&record(true), Platform::Linux).unwrap(), WriteOutcome::Created);
        let first = fs::read_to_string(&path).unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        assert_eq!(writer.write_conf(&record(true), Platform::Linux).unwrap(), WriteOutcome::Reused);
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn test_stale_header_is_kept_by_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");
        let writer = ConfigWriter::new(&path);

        writer.write_conf(&record(true), Platform::Linux).unwrap();
        let outcome = writer.write_conf(&record(false), Platform::Linux).unwrap();

        assert_eq!(outcome, WriteOutcome::Stale);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("#define HAVE_EXR 1\n"));
    }

    #[test]
    fn test_stale_header_regenerated_on_request() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");

        ConfigWriter::new(&path)
            .write_conf(&record(true), Platform::Linux)
            .unwrap();
        let outcome = ConfigWriter::new(&path)
            .with_policy(StalePolicy::Regenerate)
            .write_conf(&record(false), Platform::Linux)
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Regenerated);
        assert!(fs::read_to_string(&path).unwrap().contains("#define HAVE_EXR 0\n"));
    }

    #[test]
    fn test_hand_edited_header_counts_as_stale() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");
        fs::write(&path, "// hand written\n").unwrap();

        let outcome = ConfigWriter::new(&path)
            .write_conf(&record(true), Platform::Linux)
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Stale);
        assert_eq!(fs::read_to_string(&path).unwrap(), "// hand written\n");
    }

    #[test]
    fn test_non_utf8_header_is_kept() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");
        let contents = b"// \xff\xfe latin1 comment\n";
        fs::write(&path, contents).unwrap();

        let outcome = ConfigWriter::new(&path)
            .write_conf(&record(true), Platform::Linux)
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Stale);
        assert_eq!(fs::read(&path).unwrap(), contents);
    }

    #[test]
    fn test_directory_at_header_path_is_left_alone() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");
        fs::create_dir(&path).unwrap();

        let outcome = ConfigWriter::new(&path)
            .write_conf(&record(true), Platform::Linux)
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Stale);
        assert!(path.is_dir());
    }

    #[test]
    fn test_missing_directory_surfaces_io_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no/such/dir/config.h");

        let err = ConfigWriter::new(&path)
            .write_conf(&record(false), Platform::Linux)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
        assert_eq!(err.io_error().kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn test_stale_policy_parse() {
        assert_eq!("keep".parse::<StalePolicy>().unwrap(), StalePolicy::Keep);
        assert_eq!("Regenerate".parse::<StalePolicy>().unwrap(), StalePolicy::Regenerate);
        assert!("sometimes".parse::<StalePolicy>().is_err());
    }
}
