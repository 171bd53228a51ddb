//! Win32 profile: MSVC flags, prebuilt libraries from `../libs/msvc`, and
//! a flat installer staging directory.

use std::path::{Path, PathBuf};

use crate::core::{BuildArgs, Capabilities, Capability, CapabilityResult, Platform};
use crate::package::win32::Win32Installer;
use crate::package::PackageRule;

use super::probe::{self, EXR_LIBS, JPEG_MARKER, PTHREAD_MARKER, ZLIB_MARKER};
use super::PlatformProfile;

/// Default installer staging directory below the source root.
pub const STAGING_DIR: &str = "win32pak";

/// Profile for MSVC builds packaged with an installer script.
#[derive(Debug, Clone)]
pub struct Win32Profile {
    srcroot: PathBuf,
    prefix: PathBuf,
}

impl Win32Profile {
    /// Resolve the staging prefix (`prefix`, default `<srcroot>/win32pak`).
    pub fn init(srcroot: &Path, args: &BuildArgs) -> Self {
        Win32Profile {
            srcroot: srcroot.to_path_buf(),
            prefix: args.prefix().unwrap_or_else(|| srcroot.join(STAGING_DIR)),
        }
    }

    fn bundle_dir(&self) -> PathBuf {
        self.srcroot.join("..").join("libs").join("msvc")
    }

    fn bundled(&self, cap: Capability, args: &BuildArgs, dir: &str) -> PathBuf {
        args.capability_root(cap)
            .unwrap_or_else(|| self.bundle_dir().join(dir))
    }

    fn probe_exr(&self, args: &BuildArgs, resolved: &Capabilities) -> CapabilityResult {
        // OpenEXR's headers and import libraries need zlib.
        let Some(zlib) = resolved.get(Capability::Zlib).filter(|z| z.present) else {
            return CapabilityResult::absent(Capability::Exr);
        };

        let root = probe::bundled_exr_root(args, &self.bundle_dir());
        let exr = probe::exr(root, &EXR_LIBS);
        if exr.present {
            exr.chained_after(zlib)
        } else {
            exr
        }
    }
}

impl PlatformProfile for Win32Profile {
    fn platform(&self) -> Platform {
        Platform::Win32
    }

    fn lib_path(&self) -> PathBuf {
        self.prefix.clone()
    }

    fn plugin_path(&self) -> PathBuf {
        self.prefix.join("plugins")
    }

    fn bin_path(&self) -> PathBuf {
        self.prefix.clone()
    }

    fn conf_path(&self) -> PathBuf {
        self.prefix.clone()
    }

    fn probe(&self, cap: Capability, args: &BuildArgs, resolved: &Capabilities) -> CapabilityResult {
        match cap {
            Capability::Zlib => {
                probe::rooted(cap, self.bundled(cap, args, "zlib"), ZLIB_MARKER, &["zlib"])
            }
            Capability::Pthread => probe::rooted(
                cap,
                self.bundled(cap, args, "pthreads"),
                PTHREAD_MARKER,
                &["pthreadVC"],
            ),
            Capability::Jpeg => {
                probe::rooted(cap, self.bundled(cap, args, "jpeg"), JPEG_MARKER, &["libjpeg"])
            }
            Capability::Exr => self.probe_exr(args, resolved),
            Capability::Dynload => CapabilityResult::absent(cap),
        }
    }

    fn cxxflags(&self, args: &BuildArgs) -> String {
        let mut flags = String::from("/DWIN32 /D_WIN32 /D_USE_MATH_DEFINES /EHsc /DHAVE_CONFIG_H");
        if args.debug() {
            flags.push_str(" /Zi /GS /RTC1 /Yd /MTd");
        } else {
            flags.push_str(" /Ogitypb1 /Gs /MD /D_STATIC_CPPLIB");
        }
        if let Some(arch) = args.arch() {
            flags.push_str(&format!(" /{}", arch));
        }
        flags
    }

    fn package_rule(&self, _args: &BuildArgs) -> Option<PackageRule> {
        Some(PackageRule::new(
            "win32installer",
            Win32Installer::new(self.srcroot.join(STAGING_DIR)),
        ))
    }
}
