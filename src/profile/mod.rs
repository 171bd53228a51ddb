//! Platform build profiles.
//!
//! A profile bundles everything one platform family needs to configure the
//! renderer build: install layout, capability probes, compiler flags,
//! build-environment derivation and an optional packaging rule.
//!
//! Profiles are created once per run with [`Platform::init`], which takes
//! the place of a process-wide initialization step: the returned value
//! already carries the resolved install prefix.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{BuildArgs, Capabilities, Capability, CapabilityResult, Platform};
use crate::package::PackageRule;

mod darwin;
mod env;
mod linux;
mod probe;
mod win32;

pub use darwin::DarwinProfile;
pub use env::BuildEnvironment;
pub use linux::LinuxProfile;
pub use win32::Win32Profile;

/// Install directories of a configured build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallLayout {
    pub lib: PathBuf,
    pub plugin: PathBuf,
    pub bin: PathBuf,
    pub conf: PathBuf,
}

/// Trait for platform profile implementations.
pub trait PlatformProfile: Send + Sync {
    /// Get the platform family this profile configures.
    fn platform(&self) -> Platform;

    /// Library install directory.
    fn lib_path(&self) -> PathBuf;

    /// Plugin install directory.
    fn plugin_path(&self) -> PathBuf;

    /// Executable install directory.
    fn bin_path(&self) -> PathBuf;

    /// Configuration file install directory.
    fn conf_path(&self) -> PathBuf;

    /// Resolve one capability.
    ///
    /// `resolved` holds the results already computed in this pass, so a
    /// probe can chain onto a prerequisite resolved before it.
    fn probe(&self, cap: Capability, args: &BuildArgs, resolved: &Capabilities)
        -> CapabilityResult;

    /// Derive the compiler flag string for `args`.
    fn cxxflags(&self, args: &BuildArgs) -> String;

    /// Environment for building the core shared library.
    fn derive_shared_env(&self, common: &BuildEnvironment) -> BuildEnvironment {
        common.clone()
    }

    /// Environment for building loadable plugins.
    fn derive_plugin_env(&self, common: &BuildEnvironment) -> BuildEnvironment {
        common.clone()
    }

    /// Environment for building executables.
    fn derive_program_env(&self, common: &BuildEnvironment) -> BuildEnvironment {
        common.clone()
    }

    /// Post-build packaging rule, if this platform produces a package.
    fn package_rule(&self, _args: &BuildArgs) -> Option<PackageRule> {
        None
    }

    /// All install directories at once.
    fn install_layout(&self) -> InstallLayout {
        InstallLayout {
            lib: self.lib_path(),
            plugin: self.plugin_path(),
            bin: self.bin_path(),
            conf: self.conf_path(),
        }
    }

    /// Probe every capability in [`Capability::PROBE_ORDER`].
    fn resolve_capabilities(&self, args: &BuildArgs) -> Capabilities {
        let mut resolved = Capabilities::new();
        for cap in Capability::PROBE_ORDER {
            let result = self.probe(cap, args, &resolved);
            tracing::debug!(
                "{} {}: {}",
                self.platform(),
                cap,
                if result.present { "present" } else { "absent" }
            );
            resolved.insert(result);
        }
        resolved
    }
}

impl Platform {
    /// Create the initialized profile for this platform.
    ///
    /// `srcroot` is the source tree the build runs from; bundled library
    /// and staging locations are derived from it.
    pub fn init(self, srcroot: &Path, args: &BuildArgs) -> Box<dyn PlatformProfile> {
        for key in args.unrecognized() {
            tracing::debug!("ignoring unrecognized argument `{}`", key);
        }

        match self {
            Platform::Linux => Box::new(LinuxProfile::init(args)),
            Platform::Darwin => Box::new(DarwinProfile::init(srcroot)),
            Platform::Win32 => Box::new(Win32Profile::init(srcroot, args)),
        }
    }
}
