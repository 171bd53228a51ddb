//! The resolved configuration snapshot handed to the header writer.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::args::{BuildArgs, DOUBLE_COORDS};
use crate::core::capability::{Capabilities, Capability};
use crate::core::{PACKAGE, VERSION};

/// Precision of point coordinates in the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordPrecision {
    #[default]
    Single,
    Double,
}

impl CoordPrecision {
    pub fn from_args(args: &BuildArgs) -> Self {
        if args.flag(DOUBLE_COORDS) {
            CoordPrecision::Double
        } else {
            CoordPrecision::Single
        }
    }

    /// Minimum ray distance literal. One of two fixed values.
    pub fn min_raydist(&self) -> &'static str {
        match self {
            CoordPrecision::Single => "0.00005",
            CoordPrecision::Double => "0.000000000005",
        }
    }

    /// C type used for point coordinates (`PFLOAT`).
    pub fn point_type(&self) -> &'static str {
        match self {
            CoordPrecision::Single => "float",
            CoordPrecision::Double => "double",
        }
    }
}

/// Immutable snapshot of everything `config.h` encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationRecord {
    pub package: String,
    pub version: String,
    /// Library install directory
    pub libpath: String,
    pub precision: CoordPrecision,
    features: BTreeMap<Capability, bool>,
}

impl ConfigurationRecord {
    /// Snapshot the presence of every header capability.
    pub fn new(caps: &Capabilities, libpath: impl Into<String>, precision: CoordPrecision) -> Self {
        let features = Capability::HEADER_ORDER
            .iter()
            .map(|cap| (*cap, caps.is_present(*cap)))
            .collect();

        ConfigurationRecord {
            package: PACKAGE.to_string(),
            version: VERSION.to_string(),
            libpath: libpath.into(),
            precision,
            features,
        }
    }

    /// Whether the feature macro for `cap` is enabled.
    pub fn have(&self, cap: Capability) -> bool {
        self.features.get(&cap).copied().unwrap_or(false)
    }

    pub fn min_raydist(&self) -> &'static str {
        self.precision.min_raydist()
    }
}
