//! Optional native dependencies and their resolved build parameters.
//!
//! A probe never fails: a dependency that cannot be found resolves to an
//! absent [`CapabilityResult`] and the feature is compiled out downstream.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// An optional native dependency of the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Zlib,
    Pthread,
    Dynload,
    Jpeg,
    Exr,
}

impl Capability {
    /// Resolution order. Prerequisites come before the probes that chain
    /// onto them (ZLIB before EXR).
    pub const PROBE_ORDER: [Capability; 5] = [
        Capability::Zlib,
        Capability::Pthread,
        Capability::Dynload,
        Capability::Jpeg,
        Capability::Exr,
    ];

    /// Capabilities that get a `HAVE_<ID>` macro, in emission order.
    pub const HEADER_ORDER: [Capability; 4] = [
        Capability::Exr,
        Capability::Jpeg,
        Capability::Pthread,
        Capability::Zlib,
    ];

    /// Identifier used in generated macros.
    pub fn c_id(&self) -> &'static str {
        match self {
            Capability::Zlib => "ZLIB",
            Capability::Pthread => "PTHREAD",
            Capability::Dynload => "DL",
            Capability::Jpeg => "JPEG",
            Capability::Exr => "EXR",
        }
    }

    /// Lowercase name used for argument keys and output.
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Zlib => "zlib",
            Capability::Pthread => "pthread",
            Capability::Dynload => "dl",
            Capability::Jpeg => "jpeg",
            Capability::Exr => "exr",
        }
    }

    /// Argument key holding an explicit root override.
    pub fn path_key(&self) -> String {
        format!("{}_path", self.name())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The outcome of probing one capability.
///
/// Computed atomically by a single probe call and never mutated
/// afterwards. Absent results always carry empty lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityResult {
    pub capability: Capability,
    pub present: bool,
    /// Root the probe settled on, if it looked at the filesystem
    pub root: Option<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
    pub libs: Vec<String>,
}

impl CapabilityResult {
    /// A capability that was not found.
    pub fn absent(capability: Capability) -> Self {
        CapabilityResult {
            capability,
            present: false,
            root: None,
            include_dirs: Vec::new(),
            lib_dirs: Vec::new(),
            libs: Vec::new(),
        }
    }

    /// A capability that was found, with no build parameters yet.
    pub fn found(capability: Capability) -> Self {
        CapabilityResult {
            present: true,
            ..Self::absent(capability)
        }
    }

    /// Record the root the probe resolved.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_include(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.include_dirs.extend(dirs);
        self
    }

    pub fn with_lib_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.lib_dirs.extend(dirs);
        self
    }

    pub fn with_libs<I, S>(mut self, libs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libs.extend(libs.into_iter().map(Into::into));
        self
    }

    /// Prepend another result's parameters (a dependency whose headers and
    /// libraries this one needs transitively).
    pub fn chained_after(mut self, dep: &CapabilityResult) -> Self {
        if !dep.present {
            return self;
        }
        self.include_dirs = dep
            .include_dirs
            .iter()
            .cloned()
            .chain(self.include_dirs)
            .collect();
        self.lib_dirs = dep.lib_dirs.iter().cloned().chain(self.lib_dirs).collect();
        self.libs = dep.libs.iter().cloned().chain(self.libs).collect();
        self
    }
}

/// All capability results of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    results: BTreeMap<Capability, CapabilityResult>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result, replacing any earlier one for the same capability.
    pub fn insert(&mut self, result: CapabilityResult) {
        self.results.insert(result.capability, result);
    }

    pub fn get(&self, cap: Capability) -> Option<&CapabilityResult> {
        self.results.get(&cap)
    }

    /// Whether a capability was resolved and found present.
    pub fn is_present(&self, cap: Capability) -> bool {
        self.get(cap).is_some_and(|r| r.present)
    }

    /// Results in probe order.
    pub fn iter(&self) -> impl Iterator<Item = &CapabilityResult> {
        Capability::PROBE_ORDER
            .iter()
            .filter_map(|cap| self.results.get(cap))
    }

    fn present(&self) -> impl Iterator<Item = &CapabilityResult> {
        self.iter().filter(|r| r.present)
    }

    /// Include directories of every present capability.
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        dedup(self.present().flat_map(|r| r.include_dirs.iter().cloned()))
    }

    /// Library search directories of every present capability.
    pub fn lib_dirs(&self) -> Vec<PathBuf> {
        dedup(self.present().flat_map(|r| r.lib_dirs.iter().cloned()))
    }

    /// Link libraries of every present capability.
    pub fn libs(&self) -> Vec<String> {
        dedup(self.present().flat_map(|r| r.libs.iter().cloned()))
    }
}

impl FromIterator<CapabilityResult> for Capabilities {
    fn from_iter<T: IntoIterator<Item = CapabilityResult>>(iter: T) -> Self {
        let mut caps = Capabilities::new();
        for result in iter {
            caps.insert(result);
        }
        caps
    }
}

/// Remove duplicates, keeping the first occurrence.
fn dedup<T: PartialEq>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
