//! Moving duplicates into a subfolder of the scanned directory.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{is_plain_dir_name, ConflictPolicy, RelocateConfig};
use crate::error::RelocateError;
use crate::types::{MovedFile, RelocationReport};

/// Moves files into `<dir>/<subfolder>`, keeping their base names.
#[derive(Debug, Clone)]
pub struct Relocator {
    subfolder: String,
    policy: ConflictPolicy,
}

impl Relocator {
    /// Create a relocator from the relocate section of the config.
    pub fn new(config: &RelocateConfig) -> Self {
        Self {
            subfolder: config.subfolder.clone(),
            policy: config.on_conflict,
        }
    }

    /// The folder files will be moved into for a given scan directory.
    pub fn destination(&self, dir: &Path) -> PathBuf {
        dir.join(&self.subfolder)
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Move every path in `paths` into the subfolder of `dir`.
    ///
    /// The subfolder is created first; if that fails, or the subfolder is not
    /// a single directory name, nothing is moved. After that each file is
    /// moved independently and failures are collected in the report.
    pub fn relocate(
        &self,
        paths: &[PathBuf],
        dir: &Path,
    ) -> Result<RelocationReport, RelocateError> {
        let destination = self.destination(dir);
        if !is_plain_dir_name(&self.subfolder) {
            return Err(RelocateError::DirectoryCreate {
                path: destination,
                message: format!(
                    "{:?} is not a single directory name",
                    self.subfolder
                ),
            });
        }
        fs::create_dir_all(&destination).map_err(|e| RelocateError::DirectoryCreate {
            path: destination.clone(),
            message: e.to_string(),
        })?;

        let mut moved = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();

        for path in paths {
            match self.move_one(path, &destination) {
                Ok(to) => {
                    tracing::debug!("Moved {:?} -> {:?}", path, to);
                    moved.push(MovedFile {
                        from: path.clone(),
                        to,
                    });
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    failures.push(e);
                }
            }
        }

        tracing::info!(
            "Moved {} of {} file(s) into {:?}",
            moved.len(),
            paths.len(),
            destination
        );
        Ok(RelocationReport {
            destination,
            moved,
            failures,
        })
    }

    fn move_one(&self, src: &Path, destination: &Path) -> Result<PathBuf, RelocateError> {
        let move_error = |message: String| RelocateError::Move {
            path: src.to_path_buf(),
            message,
        };

        let name = src
            .file_name()
            .ok_or_else(|| move_error("path has no file name".to_string()))?;
        fs::symlink_metadata(src).map_err(|e| move_error(e.to_string()))?;

        let mut target = destination.join(name);
        if fs::symlink_metadata(&target).is_ok() {
            match self.policy {
                ConflictPolicy::Fail => {
                    return Err(RelocateError::NameCollision {
                        path: src.to_path_buf(),
                        destination: target,
                    });
                }
                ConflictPolicy::Overwrite => {
                    if target.is_dir() {
                        return Err(move_error(format!(
                            "{} is a directory",
                            target.display()
                        )));
                    }
                    // rename() only replaces existing files on unix
                    #[cfg(windows)]
                    fs::remove_file(&target).map_err(|e| move_error(e.to_string()))?;
                }
                ConflictPolicy::Rename => {
                    target = free_name(destination, name);
                }
            }
        }

        move_file(src, &target).map_err(move_error)?;
        Ok(target)
    }
}

/// Rename `src` to `dst`, falling back to copy and delete when the rename
/// fails (the subfolder may be a mount point or a symlink to another device).
fn move_file(src: &Path, dst: &Path) -> Result<(), String> {
    let rename_err = match fs::rename(src, dst) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    if !fs::symlink_metadata(src).is_ok_and(|m| m.is_file()) {
        return Err(rename_err.to_string());
    }
    copy_then_remove(src, dst)
        .map_err(|copy_err| format!("rename: {rename_err}, copy: {copy_err}"))
}

fn copy_then_remove(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst)?;
    if let Err(e) = fs::remove_file(src) {
        // Leave exactly one copy behind
        let _ = fs::remove_file(dst);
        return Err(e);
    }
    Ok(())
}

/// First `stem-N.ext` in `dir` that does not exist yet.
fn free_name(dir: &Path, name: &OsStr) -> PathBuf {
    let as_path = Path::new(name);
    let stem = as_path.file_stem().unwrap_or(name);
    let ext = as_path.extension();

    (1u32..)
        .map(|n| {
            let mut candidate = OsString::from(stem);
            candidate.push(format!("-{n}"));
            if let Some(ext) = ext {
                candidate.push(".");
                candidate.push(ext);
            }
            dir.join(candidate)
        })
        .find(|candidate| fs::symlink_metadata(candidate).is_err())
        .unwrap_or_else(|| dir.join(name))
}

/// Move `paths` into `<dir>/<subfolder>` with the given conflict policy.
pub fn relocate(
    paths: &[PathBuf],
    dir: &Path,
    subfolder: &str,
    policy: ConflictPolicy,
) -> Result<RelocationReport, RelocateError> {
    Relocator::new(&RelocateConfig {
        subfolder: subfolder.to_string(),
        on_conflict: policy,
    })
    .relocate(paths, dir)
}
