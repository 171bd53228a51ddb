//! High-level operations.
//!
//! Each operation resolves the selected platform profile once and then
//! works from the immutable capability results.

mod configure;
mod flags;
mod package;

pub use configure::{configure, ConfigureOptions, ConfigureReport};
pub use flags::{flags, FlagsReport};
pub use package::{package, PackageReport};

use crate::core::Capabilities;
use crate::profile::PlatformProfile;

/// A profile together with the capabilities it resolved.
pub(crate) struct Resolved {
    pub profile: Box<dyn PlatformProfile>,
    pub capabilities: Capabilities,
}

impl Resolved {
    pub fn new(opts: &ConfigureOptions) -> Self {
        let profile = opts.platform.init(&opts.srcroot, &opts.args);
        let capabilities = profile.resolve_capabilities(&opts.args);
        Resolved {
            profile,
            capabilities,
        }
    }
}
