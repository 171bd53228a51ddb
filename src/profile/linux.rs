//! Linux (and generic Unix) profile: a conventional prefix tree.

use std::path::{Path, PathBuf};

use crate::core::{BuildArgs, Capabilities, Capability, CapabilityResult, Platform};

use super::probe::{self, EXR_LIBS, JPEG_MARKER, PTHREAD_MARKER, ZLIB_MARKER};
use super::PlatformProfile;

const DEFAULT_PREFIX: &str = "/usr/local";
const SYSTEM_ROOT: &str = "/usr";

/// Profile for Unix-style installs under `<prefix>/{lib,bin,etc}`.
#[derive(Debug, Clone)]
pub struct LinuxProfile {
    prefix: PathBuf,
}

impl LinuxProfile {
    /// Resolve the install prefix (`prefix`, default `/usr/local`).
    pub fn init(args: &BuildArgs) -> Self {
        LinuxProfile {
            prefix: args.prefix().unwrap_or_else(|| PathBuf::from(DEFAULT_PREFIX)),
        }
    }

    fn probe_jpeg(&self, args: &BuildArgs) -> CapabilityResult {
        match args.capability_root(Capability::Jpeg) {
            Some(root) => probe::rooted(Capability::Jpeg, root, JPEG_MARKER, &["jpeg"]),
            // System headers need no extra search paths.
            None if probe::marker_present(Path::new(SYSTEM_ROOT), JPEG_MARKER) => {
                CapabilityResult::found(Capability::Jpeg)
                    .with_root(SYSTEM_ROOT)
                    .with_libs(["jpeg"])
            }
            None => CapabilityResult::absent(Capability::Jpeg),
        }
    }
}

impl PlatformProfile for LinuxProfile {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn lib_path(&self) -> PathBuf {
        self.prefix.join("lib")
    }

    fn plugin_path(&self) -> PathBuf {
        self.prefix.join("lib").join("yafray")
    }

    fn bin_path(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    fn conf_path(&self) -> PathBuf {
        self.prefix.join("etc")
    }

    fn probe(
        &self,
        cap: Capability,
        args: &BuildArgs,
        _resolved: &Capabilities,
    ) -> CapabilityResult {
        match cap {
            Capability::Exr => {
                let root = args
                    .capability_root(cap)
                    .unwrap_or_else(|| PathBuf::from(SYSTEM_ROOT));
                probe::exr(root, &EXR_LIBS)
            }
            Capability::Jpeg => self.probe_jpeg(args),
            Capability::Pthread => probe::system(cap, args, Some(PTHREAD_MARKER), &["pthread"]),
            Capability::Zlib => probe::system(cap, args, Some(ZLIB_MARKER), &["z"]),
            Capability::Dynload => probe::system(cap, args, None, &["dl"]),
        }
    }

    fn cxxflags(&self, args: &BuildArgs) -> String {
        let mut flags = String::from("-Wall -DHAVE_CONFIG_H -D_PTHREADS");
        if args.debug() {
            flags.push_str(" -O3 -ffast-math -ggdb");
        } else {
            flags.push_str(" -O3 -ffast-math -fomit-frame-pointer");
        }
        if let Some(arch) = args.arch() {
            flags.push_str(&format!(" -march={}", arch));
        }
        if let Some(tune) = args.tune() {
            flags.push_str(&format!(" -mtune={}", tune));
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let profile = LinuxProfile::init(&BuildArgs::new());
        assert_eq!(profile.lib_path(), PathBuf::from("/usr/local/lib"));
        assert_eq!(profile.plugin_path(), PathBuf::from("/usr/local/lib/yafray"));
        assert_eq!(profile.bin_path(), PathBuf::from("/usr/local/bin"));
        assert_eq!(profile.conf_path(), PathBuf::from("/usr/local/etc"));
    }

    #[test]
    fn test_prefix_override() {
        let profile = LinuxProfile::init(&BuildArgs::new().with("prefix", "/opt/yafray"));
        assert_eq!(profile.lib_path(), PathBuf::from("/opt/yafray/lib"));
        assert_eq!(profile.conf_path(), PathBuf::from("/opt/yafray/etc"));
    }

    #[test]
    fn test_cxxflags_release() {
        let args = BuildArgs::new();
        let profile = LinuxProfile::init(&args);
        assert_eq!(
            profile.cxxflags(&args),
            "-Wall -DHAVE_CONFIG_H -D_PTHREADS -O3 -ffast-math -fomit-frame-pointer"
        );
    }

    #[test]
    fn test_cxxflags_debug_arch_tune() {
        let args = BuildArgs::new()
            .with("debug", "1")
            .with("arch", "athlon-xp")
            .with("tune", "pentium4");
        let profile = LinuxProfile::init(&args);
        assert_eq!(
            profile.cxxflags(&args),
            "-Wall -DHAVE_CONFIG_H -D_PTHREADS -O3 -ffast-math -ggdb -march=athlon-xp -mtune=pentium4"
        );
    }

    #[test]
    fn test_exr_override_present() {
        let tmp = TempDir::new().unwrap();
        let marker = tmp.path().join("include/OpenEXR/half.h");
        fs::create_dir_all(marker.parent().unwrap()).unwrap();
        fs::write(&marker, "").unwrap();

        let args = BuildArgs::new().with("exr_path", tmp.path().to_string_lossy());
        let profile = LinuxProfile::init(&args);
        let r = profile.probe(Capability::Exr, &args, &Capabilities::new());

        assert!(r.present);
        assert_eq!(r.include_dirs, vec![tmp.path().join("include/OpenEXR")]);
        assert_eq!(r.lib_dirs, vec![tmp.path().join("lib")]);
        assert_eq!(r.libs, vec!["IlmImf", "Imath", "Iex", "Half"]);
    }

    #[test]
    fn test_jpeg_override_missing() {
        let tmp = TempDir::new().unwrap();
        let args = BuildArgs::new().with("jpeg_path", tmp.path().join("nope").to_string_lossy());
        let profile = LinuxProfile::init(&args);
        let r = profile.probe(Capability::Jpeg, &args, &Capabilities::new());
        assert_eq!(r, CapabilityResult::absent(Capability::Jpeg));
    }

    #[test]
    fn test_toolchain_libraries_always_present() {
        let args = BuildArgs::new();
        let caps = LinuxProfile::init(&args).resolve_capabilities(&args);
        assert!(caps.is_present(Capability::Pthread));
        assert!(caps.is_present(Capability::Zlib));
        assert!(caps.is_present(Capability::Dynload));
        let libs = caps.libs();
        assert!(libs.contains(&"pthread".to_string()));
        assert!(libs.contains(&"z".to_string()));
        assert!(libs.contains(&"dl".to_string()));
    }
}
