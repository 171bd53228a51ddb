//! CLI integration tests for yafray-build.
//!
//! These tests drive the binary against a scratch source tree.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the yafray-build binary command, isolated from the user's config.
fn yafray_build(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("yafray-build").unwrap();
    cmd.env("HOME", home).env_remove("YAFRAY_PLATFORM");
    cmd
}

/// Create a temporary directory for the source tree.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

// ============================================================================
// yafray-build configure
// ============================================================================

#[test]
fn test_configure_creates_header() {
    let tmp = temp_dir();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure", "prefix=/opt/yafray"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    let header = fs::read_to_string(tmp.path().join("config.h")).unwrap();
    assert!(header.starts_with("// Config file header generated by yafray-build\n"));
    assert!(header.contains("#define LIBPATH \"/opt/yafray/lib\"\n"));
    assert!(header.contains("#define HAVE_PTHREAD 1\n"));
    assert!(header.contains("#define MIN_RAYDIST 0.00005\n"));
}

#[test]
fn test_configure_reuses_existing_header() {
    let tmp = temp_dir();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure"])
        .current_dir(tmp.path())
        .assert()
        .success();
    let first = fs::read_to_string(tmp.path().join("config.h")).unwrap();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure", "double_coords=1"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Using"));

    let second = fs::read_to_string(tmp.path().join("config.h")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_configure_regenerate_replaces_stale_header() {
    let tmp = temp_dir();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure"])
        .current_dir(tmp.path())
        .assert()
        .success();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure", "--regenerate", "double_coords=1"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Regenerated"));

    let header = fs::read_to_string(tmp.path().join("config.h")).unwrap();
    assert!(header.contains("#define MIN_RAYDIST 0.000000000005\n"));
    assert!(header.contains("typedef double PFLOAT;\n"));
}

#[test]
fn test_configure_stale_policy_flag() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join(".yafray")).unwrap();
    fs::write(
        tmp.path().join(".yafray/config.toml"),
        "[configure]\nstale = \"regenerate\"\n",
    )
    .unwrap();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure"])
        .current_dir(tmp.path())
        .assert()
        .success();
    let first = fs::read_to_string(tmp.path().join("config.h")).unwrap();

    // The command line overrides the config file.
    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure", "--stale", "keep", "double_coords=1"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("stale"));
    assert_eq!(fs::read_to_string(tmp.path().join("config.h")).unwrap(), first);

    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure", "--stale", "sometimes"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

#[test]
fn test_configure_reads_project_config() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join(".yafray")).unwrap();
    fs::write(
        tmp.path().join(".yafray/config.toml"),
        "[configure]\nplatform = \"win32\"\n\n[args]\nprefix = \"C:/yafray\"\n",
    )
    .unwrap();

    yafray_build(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .success();

    let header = fs::read_to_string(tmp.path().join("config.h")).unwrap();
    assert!(header.contains("#define LIBPATH \"C:/yafray\"\n"));
    assert!(header.contains("__declspec(dllexport)"));
}

#[test]
fn test_configure_rejects_malformed_argument() {
    let tmp = temp_dir();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "configure", "prefix"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));

    assert!(!tmp.path().join("config.h").exists());
}

#[test]
fn test_unknown_platform_is_rejected() {
    let tmp = temp_dir();

    yafray_build(tmp.path())
        .args(["--platform", "beos", "configure"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

// ============================================================================
// yafray-build flags
// ============================================================================

#[test]
fn test_flags_json() {
    let tmp = temp_dir();

    let output = yafray_build(tmp.path())
        .args(["--platform", "darwin", "flags", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["platform"], "darwin");
    assert_eq!(report["shared"]["shlib_suffix"], ".dylib");
    assert_eq!(report["program"]["shlib_suffix"], ".so");
}

#[test]
fn test_flags_text() {
    let tmp = temp_dir();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "flags", "arch=pentium4"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-march=pentium4"))
        .stdout(predicate::str::contains("# plugin"));
}

// ============================================================================
// yafray-build package
// ============================================================================

#[test]
fn test_package_linux_has_no_step() {
    let tmp = temp_dir();

    yafray_build(tmp.path())
        .args(["--platform", "linux", "package"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing to package"));
}

#[test]
fn test_package_win32_without_template_fails() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join("win32pak")).unwrap();

    yafray_build(tmp.path())
        .args(["--platform", "win32", "package"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}
