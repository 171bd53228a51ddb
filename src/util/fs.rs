//! Filesystem utilities.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use regex::{NoExpand, Regex};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Remove a file, if it exists.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write `contents` to `path` so that readers never observe a partial file.
///
/// The data goes to a temporary file in the same directory first and is
/// then renamed into place. With `clobber == false` an existing file is
/// left alone and the rename fails with `AlreadyExists`.
pub fn write_atomic(path: &Path, contents: &[u8], clobber: bool) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    if clobber {
        tmp.persist(path).map_err(|e| e.error)?;
    } else {
        tmp.persist_noclobber(path).map_err(|e| e.error)?;
    }
    Ok(())
}

/// Find files matching glob patterns relative to a base directory.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in
            glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Delete every file or directory below `dir` whose name matches `pattern`.
///
/// Matching directories are removed with their contents. Returns the
/// number of entries removed.
pub fn prune_matching(dir: &Path, pattern: &Regex) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut doomed = Vec::new();
    let mut walker = WalkDir::new(dir).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", dir.display()))?;
        if pattern.is_match(&entry.file_name().to_string_lossy()) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            doomed.push((entry.path().to_path_buf(), entry.file_type().is_dir()));
        }
    }

    for (path, is_dir) in &doomed {
        if *is_dir {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
        .with_context(|| format!("failed to remove {}", path.display()))?;
        tracing::debug!("removed {}", path.display());
    }

    Ok(doomed.len())
}

/// Copy `input` to `output` line by line, applying every regex
/// replacement to each line. Replacement text is inserted literally.
pub fn replace_in_file(replacements: &[(Regex, String)], input: &Path, output: &Path) -> Result<()> {
    let contents = read_to_string(input)?;

    let mut out = String::with_capacity(contents.len());
    for line in contents.split_inclusive('\n') {
        let mut line = line.to_string();
        for (pattern, replacement) in replacements {
            line = pattern
                .replace_all(&line, NoExpand(replacement))
                .into_owned();
        }
        out.push_str(&line);
    }

    fs::write(output, out).with_context(|| format!("failed to write file: {}", output.display()))
}
