//! Derived build environments for the native build.

use serde::Serialize;

use crate::core::Platform;
use crate::profile::BuildEnvironment;

use super::{ConfigureOptions, Resolved};

/// The three environments a build derives from the common one.
#[derive(Debug, Clone, Serialize)]
pub struct FlagsReport {
    pub platform: Platform,
    pub shared: BuildEnvironment,
    pub plugin: BuildEnvironment,
    pub program: BuildEnvironment,
}

/// Resolve capabilities and derive the shared-library, plugin and program
/// environments.
pub fn flags(opts: &ConfigureOptions) -> FlagsReport {
    let Resolved {
        profile,
        capabilities,
    } = Resolved::new(opts);

    let common = BuildEnvironment::common(profile.as_ref(), &opts.args, &capabilities);

    FlagsReport {
        platform: opts.platform,
        shared: profile.derive_shared_env(&common),
        plugin: profile.derive_plugin_env(&common),
        program: profile.derive_program_env(&common),
    }
}
