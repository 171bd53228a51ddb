//! User-argument mapping.
//!
//! Arguments arrive as `KEY=VALUE` pairs on the command line or as the
//! `[args]` table of a config file. Unknown keys are kept but never
//! interpreted; missing keys fall back to the platform defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::core::capability::Capability;

/// Install prefix override.
pub const PREFIX: &str = "prefix";
/// Build with debug symbols instead of release optimizations.
pub const DEBUG: &str = "debug";
/// Target architecture (`-march=` / `/arch`).
pub const ARCH: &str = "arch";
/// Target CPU tuning (`-mtune=`).
pub const TUNE: &str = "tune";
/// Use double precision for point coordinates.
pub const DOUBLE_COORDS: &str = "double_coords";
/// Prefer the dynamic OpenEXR build over the static one.
pub const DYNAMIC_EXR: &str = "dynamic_exr";

/// Every key the profiles understand.
pub const RECOGNIZED_KEYS: &[&str] = &[
    PREFIX,
    DEBUG,
    ARCH,
    TUNE,
    DOUBLE_COORDS,
    DYNAMIC_EXR,
    "exr_path",
    "jpeg_path",
    "zlib_path",
    "pthread_path",
];

/// The user-supplied argument mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    values: BTreeMap<String, String>,
}

impl BuildArgs {
    /// Create an empty argument mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `KEY=VALUE` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = BuildArgs::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((key, value)) = pair.split_once('=') else {
                bail!("invalid argument `{}`: expected KEY=VALUE", pair);
            };
            let key = key.trim();
            if key.is_empty() {
                bail!("invalid argument `{}`: empty key", pair);
            }
            args.set(key, value.trim());
        }
        Ok(args)
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`BuildArgs::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Merge another mapping into this one (other takes precedence).
    pub fn merge(&mut self, other: BuildArgs) {
        self.values.extend(other.values);
    }

    /// Raw value lookup. Empty values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Interpret a key as a boolean switch.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map(parse_bool).unwrap_or(false)
    }

    /// Interpret a key as a filesystem path.
    pub fn path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).map(PathBuf::from)
    }

    /// Explicit root override for a capability (`<name>_path`).
    pub fn capability_root(&self, cap: Capability) -> Option<PathBuf> {
        self.path(&cap.path_key())
    }

    pub fn debug(&self) -> bool {
        self.flag(DEBUG)
    }

    pub fn arch(&self) -> Option<&str> {
        self.get(ARCH)
    }

    pub fn tune(&self) -> Option<&str> {
        self.get(TUNE)
    }

    pub fn prefix(&self) -> Option<PathBuf> {
        self.path(PREFIX)
    }

    /// Keys present in the mapping that no profile interprets.
    pub fn unrecognized(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| !RECOGNIZED_KEYS.contains(k))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for BuildArgs {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        BuildArgs {
            values: iter.into_iter().collect(),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let args = BuildArgs::from_pairs(["debug=1", "arch = pentium4", "prefix=/opt/yafray"]).unwrap();
        assert!(args.debug());
        assert_eq!(args.arch(), Some("pentium4"));
        assert_eq!(args.prefix(), Some(PathBuf::from("/opt/yafray")));
        assert_eq!(args.tune(), None);
    }

    #[test]
    fn test_from_pairs_rejects_missing_separator() {
        assert!(BuildArgs::from_pairs(["debug"]).is_err());
        assert!(BuildArgs::from_pairs(["=1"]).is_err());
    }

    #[test]
    fn test_flag_parsing() {
        let args = BuildArgs::new()
            .with("a", "yes")
            .with("b", "0")
            .with("c", "TRUE")
            .with("d", "nope");
        assert!(args.flag("a"));
        assert!(!args.flag("b"));
        assert!(args.flag("c"));
        assert!(!args.flag("d"));
        assert!(!args.flag("missing"));
    }

    #[test]
    fn test_empty_value_is_unset() {
        let args = BuildArgs::new().with(ARCH, "");
        assert_eq!(args.arch(), None);
    }

    #[test]
    fn test_merge_precedence() {
        let mut base = BuildArgs::new().with(PREFIX, "/usr").with(DEBUG, "1");
        base.merge(BuildArgs::new().with(PREFIX, "/opt"));
        assert_eq!(base.prefix(), Some(PathBuf::from("/opt")));
        assert!(base.debug());
    }

    #[test]
    fn test_unrecognized_keys() {
        let args = BuildArgs::new()
            .with("exr_path", "/opt/exr")
            .with("colour", "blue");
        assert_eq!(args.unrecognized(), vec!["colour"]);
        assert_eq!(
            args.capability_root(Capability::Exr),
            Some(PathBuf::from("/opt/exr"))
        );
    }
}
