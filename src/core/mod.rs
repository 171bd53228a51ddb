//! Core data structures for yafray-build.
//!
//! This module contains the value types shared by every stage:
//! - The user-argument mapping
//! - Platform families
//! - Capability probe results
//! - The configuration record consumed by the header writer

pub mod args;
pub mod capability;
pub mod platform;
pub mod record;

pub use args::BuildArgs;
pub use capability::{Capabilities, Capability, CapabilityResult};
pub use platform::Platform;
pub use record::{ConfigurationRecord, CoordPrecision};

/// Package name written into `config.h`.
pub const PACKAGE: &str = "yafray";

/// Package version written into `config.h`.
pub const VERSION: &str = "0.0.9";

/// Default name of the generated configuration header.
pub const CONFIG_FILE: &str = "config.h";
