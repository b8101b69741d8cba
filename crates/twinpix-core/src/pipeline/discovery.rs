//! Flat discovery of eligible image files in a single directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{normalize_extension, ScanConfig, ScanOrder};
use crate::error::ScanError;

/// Finds eligible image files directly inside a directory.
pub struct FileDiscovery {
    extensions: Vec<String>,
    order: ScanOrder,
}

/// An eligible image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Full path to the file
    pub path: PathBuf,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            extensions: config
                .extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .filter(|ext| !ext.is_empty())
                .collect(),
            order: config.order,
        }
    }

    /// List the eligible files directly inside `dir`.
    ///
    /// Subdirectories are never descended into. Fails only when `dir` itself
    /// cannot be listed. An entry that cannot be inspected (a dangling
    /// symlink, say) is still returned when its name is eligible, so that
    /// hashing reports it as a per-file failure.
    pub fn discover(&self, dir: &Path) -> Result<Vec<ImageFile>, ScanError> {
        if !dir.is_dir() {
            let message = if dir.exists() {
                "not a directory"
            } else {
                "directory does not exist"
            };
            return Err(ScanError::Enumeration {
                path: dir.to_path_buf(),
                message: message.to_string(),
            });
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ScanError::Enumeration {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    match e.path() {
                        Some(path) if self.is_supported(path) => {
                            tracing::warn!("Cannot inspect {:?}: {}", path, e);
                            files.push(ImageFile {
                                path: path.to_path_buf(),
                            });
                        }
                        _ => tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e),
                    }
                    continue;
                }
            };

            if entry.file_type().is_file() && self.is_supported(entry.path()) {
                files.push(ImageFile {
                    path: entry.path().to_path_buf(),
                });
            }
        }

        if self.order == ScanOrder::Sorted {
            files.sort_by(|a, b| a.path.cmp(&b.path));
        }
        tracing::debug!("Discovered {} eligible file(s) in {:?}", files.len(), dir);
        Ok(files)
    }

    /// Check if a file has an eligible extension.
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext_lower)
            })
            .unwrap_or(false)
    }
}
