//! Filesystem checks shared by the platform probes.

use std::path::{Path, PathBuf};

use crate::core::args::DYNAMIC_EXR;
use crate::core::{BuildArgs, Capability, CapabilityResult};

/// Header whose presence marks an OpenEXR install.
pub(crate) const EXR_MARKER: &str = "include/OpenEXR/half.h";
pub(crate) const JPEG_MARKER: &str = "include/jpeglib.h";
pub(crate) const ZLIB_MARKER: &str = "include/zlib.h";
pub(crate) const PTHREAD_MARKER: &str = "include/pthread.h";

pub(crate) const EXR_LIBS: [&str; 4] = ["IlmImf", "Imath", "Iex", "Half"];

/// Check for `marker` below `root`.
pub(crate) fn marker_present(root: &Path, marker: &str) -> bool {
    let path = root.join(marker);
    let found = path.is_file();
    tracing::trace!("probe {}: {}", path.display(), found);
    found
}

/// Probe a library laid out as `<root>/include` + `<root>/lib`.
///
/// Present only if `marker` exists below `root`.
pub(crate) fn rooted(
    cap: Capability,
    root: PathBuf,
    marker: &str,
    libs: &[&str],
) -> CapabilityResult {
    if !marker_present(&root, marker) {
        return CapabilityResult::absent(cap);
    }

    CapabilityResult::found(cap)
        .with_include([root.join("include")])
        .with_lib_dirs([root.join("lib")])
        .with_libs(libs.iter().copied())
        .with_root(root)
}

/// Probe an OpenEXR install.
///
/// Headers live in `include/OpenEXR` rather than directly in `include`.
pub(crate) fn exr(root: PathBuf, libs: &[&str]) -> CapabilityResult {
    if !marker_present(&root, EXR_MARKER) {
        return CapabilityResult::absent(Capability::Exr);
    }

    CapabilityResult::found(Capability::Exr)
        .with_include([root.join("include").join("OpenEXR")])
        .with_lib_dirs([root.join("lib")])
        .with_libs(libs.iter().copied())
        .with_root(root)
}

/// OpenEXR root for platforms that ship prebuilt libraries next to the
/// source tree: the explicit override, else the dynamic or static bundle.
pub(crate) fn bundled_exr_root(args: &BuildArgs, bundle_dir: &Path) -> PathBuf {
    args.capability_root(Capability::Exr).unwrap_or_else(|| {
        if args.flag(DYNAMIC_EXR) {
            bundle_dir.join("openexr")
        } else {
            bundle_dir.join("openexr_static")
        }
    })
}

/// A library the Unix toolchains provide out of the box.
///
/// Always present unless an explicit root override is given, in which
/// case the override must contain `marker`.
pub(crate) fn system(
    cap: Capability,
    args: &BuildArgs,
    marker: Option<&str>,
    libs: &[&str],
) -> CapabilityResult {
    match (args.capability_root(cap), marker) {
        (Some(root), Some(marker)) => rooted(cap, root, marker, libs),
        _ => CapabilityResult::found(cap).with_libs(libs.iter().copied()),
    }
}
