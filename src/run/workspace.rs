// src/run/workspace.rs

//! Run-directory layout
//!
//! ```text
//! run_root/
//!   _dust_prop_th.tmp          shared SED artifact (computed once)
//!   data_th/                   shared SED output
//!   <stem><identity>/          one isolated directory per evaluation
//!     <file>_stis.para ...     per-instrument parameter files
//!     data_0.5852/ ...         per-instrument image output
//! ```
//!
//! Image-only evaluations link the shared SED files into their isolated
//! directory instead of recomputing them.

use crate::run::identity::RunIdentity;
use crate::run::runner::RunError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Dust-property file written by the SED stage.
pub const SED_ARTIFACT: &str = "_dust_prop_th.tmp";

/// Directory holding the SED stage output.
pub const SED_OUTPUT_DIR: &str = "data_th";

/// Image output directories are named `data_<wavelength>`.
pub fn is_image_dir(name: &str) -> bool {
    name.strip_prefix("data_")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

/// Creates `root` if needed, otherwise clears stale image output from it.
/// SED output and isolated run directories are left in place.
pub fn prepare_run_root(root: &Path) -> io::Result<()> {
    if !root.exists() {
        debug!(root = %root.display(), "creating run root");
        return fs::create_dir_all(root);
    }

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name();
        if !is_image_dir(&name.to_string_lossy()) {
            continue;
        }
        // Another walker may clear the same directory first
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => remove_stale_dir(&entry.path())?,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Removes `dir`; a directory that is already gone counts as removed.
fn remove_stale_dir(dir: &Path) -> io::Result<()> {
    debug!(dir = %dir.display(), "removing stale image output");
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}

/// Path of the isolated directory for `identity` under `root`.
pub fn isolated_dir(root: &Path, identity: &RunIdentity) -> PathBuf {
    let stem = root
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "run".to_string());
    root.join(format!("{}{}", stem, identity))
}

/// Creates a fresh isolated directory, replacing any colliding one.
pub fn create_isolated_dir(root: &Path, identity: &RunIdentity) -> io::Result<PathBuf> {
    let dir = isolated_dir(root, identity);
    if dir.exists() {
        warn!(dir = %dir.display(), "run directory already exists, replacing it");
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir(&dir)?;
    Ok(dir)
}

/// Whether `dir` holds a previously computed SED artifact.
pub fn has_sed_artifact(dir: &Path) -> bool {
    dir.join(SED_ARTIFACT).is_file()
}

/// Links the shared SED artifact and output directory of `root` into `dir`.
pub fn link_sed_artifacts(root: &Path, dir: &Path) -> Result<(), RunError> {
    if !has_sed_artifact(root) {
        return Err(RunError::MissingSedArtifact(root.to_path_buf()));
    }
    let root = root.canonicalize()?;

    symlink_file(&root.join(SED_ARTIFACT), &dir.join(SED_ARTIFACT))?;
    let sed_output = root.join(SED_OUTPUT_DIR);
    if sed_output.is_dir() {
        symlink_dir(&sed_output, &dir.join(SED_OUTPUT_DIR))?;
    } else {
        warn!(root = %root.display(), "no shared SED output directory to link");
    }
    Ok(())
}

/// Removes a run directory. Links inside it are removed, not their targets.
pub fn remove_run_dir(dir: &Path) {
    match fs::remove_dir_all(dir) {
        Ok(()) => debug!(dir = %dir.display(), "removed run directory"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(dir = %dir.display(), error = %e, "failed to remove run directory"),
    }
}

#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}
