//! yafray-build - platform configuration for the yafray renderer build
//!
//! This crate probes the host for the renderer's optional native
//! dependencies, derives per-platform compiler and linker settings, and
//! writes the `config.h` header the native build includes.

pub mod confgen;
pub mod core;
pub mod ops;
pub mod package;
pub mod profile;
pub mod util;

pub use confgen::{ConfigWriter, StalePolicy, WriteOutcome};
pub use core::{
    BuildArgs, Capabilities, Capability, CapabilityResult, ConfigurationRecord, CoordPrecision,
    Platform,
};
pub use profile::{BuildEnvironment, InstallLayout, PlatformProfile};
