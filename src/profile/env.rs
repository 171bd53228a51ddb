//! Build environments handed to the native build.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::{BuildArgs, Capabilities, Platform};

use super::PlatformProfile;

/// Compiler and linker settings for one kind of build product.
///
/// Derivation always copies: profiles layer overrides onto a clone and
/// never touch the environment they were given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEnvironment {
    pub platform: Platform,
    /// Compiler flags
    pub cxxflags: Vec<String>,
    /// Flags for linking shared libraries and plugins
    pub shlinkflags: Vec<String>,
    /// Shared library file suffix
    pub shlib_suffix: String,
    /// Include search directories
    pub include_dirs: Vec<PathBuf>,
    /// Library search directories
    pub lib_dirs: Vec<PathBuf>,
    /// Libraries to link (short names)
    pub libs: Vec<String>,
}

impl BuildEnvironment {
    /// Baseline environment: the profile's flags plus the search paths and
    /// libraries of every present capability.
    pub fn common(profile: &dyn PlatformProfile, args: &BuildArgs, caps: &Capabilities) -> Self {
        let platform = profile.platform();
        let shlinkflags = if platform.msvc_style() {
            vec!["/DLL".to_string()]
        } else {
            vec!["-shared".to_string()]
        };

        BuildEnvironment {
            platform,
            cxxflags: split_flags(&profile.cxxflags(args)),
            shlinkflags,
            shlib_suffix: platform.shlib_suffix().to_string(),
            include_dirs: caps.include_dirs(),
            lib_dirs: caps.lib_dirs(),
            libs: caps.libs(),
        }
    }

    /// Append whitespace-separated compiler flags.
    pub fn append_cxxflags(&mut self, flags: &str) {
        self.cxxflags.extend(split_flags(flags));
    }

    /// Compiler arguments: flags followed by include directories.
    pub fn compile_args(&self) -> Vec<String> {
        let mut args = self.cxxflags.clone();
        for dir in &self.include_dirs {
            if self.platform.msvc_style() {
                args.push(format!("/I{}", dir.display()));
            } else {
                args.push(format!("-I{}", dir.display()));
            }
        }
        args
    }

    /// Linker arguments: search directories followed by libraries.
    pub fn link_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for dir in &self.lib_dirs {
            if self.platform.msvc_style() {
                args.push(format!("/LIBPATH:{}", dir.display()));
            } else {
                args.push(format!("-L{}", dir.display()));
            }
        }
        for lib in &self.libs {
            if self.platform.msvc_style() {
                args.push(format!("{}.lib", lib));
            } else {
                args.push(format!("-l{}", lib));
            }
        }
        args
    }
}

fn split_flags(flags: &str) -> Vec<String> {
    flags.split_whitespace().map(String::from).collect()
}
