//! OS X profile.
//!
//! Installs go into a package staging tree below the source root, and the
//! image libraries come prebuilt from `../libs/osx`.

use std::path::{Path, PathBuf};

use crate::core::{BuildArgs, Capabilities, Capability, CapabilityResult, Platform, VERSION};
use crate::package::osx::OsxPackager;
use crate::package::PackageRule;

use super::env::BuildEnvironment;
use super::probe::{self, EXR_LIBS, JPEG_MARKER, PTHREAD_MARKER, ZLIB_MARKER};
use super::PlatformProfile;

/// Staging directory holding the package contents.
pub const STAGING_DIR: &str = "osxpaknocvs";

/// Profile for OS X package builds.
#[derive(Debug, Clone)]
pub struct DarwinProfile {
    srcroot: PathBuf,
}

impl DarwinProfile {
    /// The staging tree is fixed; `prefix` is not consulted.
    pub fn init(srcroot: &Path) -> Self {
        DarwinProfile {
            srcroot: srcroot.to_path_buf(),
        }
    }

    fn package_root(&self) -> PathBuf {
        self.srcroot.join(STAGING_DIR).join("Package_Root")
    }

    fn usr_local(&self) -> PathBuf {
        self.package_root().join("usr").join("local")
    }

    fn bundle_dir(&self) -> PathBuf {
        self.srcroot.join("..").join("libs").join("osx")
    }
}

impl PlatformProfile for DarwinProfile {
    fn platform(&self) -> Platform {
        Platform::Darwin
    }

    fn lib_path(&self) -> PathBuf {
        self.usr_local().join("lib")
    }

    fn plugin_path(&self) -> PathBuf {
        self.usr_local().join("lib").join("yafray")
    }

    fn bin_path(&self) -> PathBuf {
        self.usr_local().join("bin")
    }

    fn conf_path(&self) -> PathBuf {
        self.package_root().join("private").join("etc")
    }

    fn probe(
        &self,
        cap: Capability,
        args: &BuildArgs,
        _resolved: &Capabilities,
    ) -> CapabilityResult {
        match cap {
            Capability::Exr => {
                let root = probe::bundled_exr_root(args, &self.bundle_dir());
                let libs: Vec<&str> = EXR_LIBS.iter().copied().chain(["z"]).collect();
                probe::exr(root, &libs)
            }
            Capability::Jpeg => {
                let root = args
                    .capability_root(cap)
                    .unwrap_or_else(|| self.bundle_dir().join("jpeg"));
                probe::rooted(cap, root, JPEG_MARKER, &["jpeg"])
            }
            Capability::Pthread => probe::system(cap, args, Some(PTHREAD_MARKER), &["pthread"]),
            Capability::Zlib => probe::system(cap, args, Some(ZLIB_MARKER), &["z"]),
            Capability::Dynload => probe::system(cap, args, None, &["dl"]),
        }
    }

    fn cxxflags(&self, args: &BuildArgs) -> String {
        let mut flags = String::from("-Wall -DHAVE_CONFIG_H");
        if self
            .probe(Capability::Pthread, args, &Capabilities::new())
            .present
        {
            flags.push_str(" -D_PTHREADS");
        }
        if args.debug() {
            flags.push_str(" -O3 -ffast-math -ggdb");
        } else {
            flags.push_str(" -O3 -ffast-math -fomit-frame-pointer");
        }
        flags
    }

    fn derive_shared_env(&self, common: &BuildEnvironment) -> BuildEnvironment {
        let mut env = common.clone();
        env.shlinkflags = vec!["-dynamic".into(), "-dynamiclib".into(), "-dylib".into()];
        env.shlib_suffix = ".dylib".into();
        env.append_cxxflags("-dynamic");
        env
    }

    fn derive_plugin_env(&self, common: &BuildEnvironment) -> BuildEnvironment {
        let mut env = common.clone();
        env.shlinkflags = vec!["-Wall".into(), "-bundle".into()];
        env.append_cxxflags("-dynamic");
        env
    }

    fn package_rule(&self, _args: &BuildArgs) -> Option<PackageRule> {
        Some(PackageRule::new(
            "osxpackage",
            OsxPackager::new(&self.srcroot, VERSION),
        ))
    }
}
