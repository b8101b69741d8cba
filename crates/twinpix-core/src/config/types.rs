//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Perceptual hashing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Side of the low-frequency coefficient grid. A fingerprint has
    /// `hash_size * hash_size` bits.
    pub hash_size: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self { hash_size: 8 }
    }
}

/// Order in which eligible files are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrder {
    /// Lexicographic by path, reproducible across platforms
    #[default]
    Sorted,
    /// Raw directory-listing order as returned by the OS
    Listing,
}

/// Directory scanning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Eligible file extensions, matched case-insensitively. A leading dot
    /// is ignored.
    pub extensions: Vec<String>,

    /// Classification order
    pub order: ScanOrder,

    /// Number of hashing workers; 0 uses every available core
    pub parallel_workers: usize,
}

impl ScanConfig {
    /// Hashing workers after resolving 0 to the available core count.
    pub fn worker_count(&self) -> usize {
        match self.parallel_workers {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            n => n,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
            ],
            order: ScanOrder::default(),
            parallel_workers: 0,
        }
    }
}

/// What to do when the destination already holds a file with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Leave the file in place and report a name collision
    Fail,
    /// Replace the existing file
    Overwrite,
    /// Append `-1`, `-2`, ... to the file stem until the name is free
    #[default]
    Rename,
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictPolicy::Fail => write!(f, "fail"),
            ConflictPolicy::Overwrite => write!(f, "overwrite"),
            ConflictPolicy::Rename => write!(f, "rename"),
        }
    }
}

/// Relocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelocateConfig {
    /// Name of the subfolder duplicates are moved into
    pub subfolder: String,

    /// Policy for name collisions in the subfolder
    pub on_conflict: ConflictPolicy,
}

impl Default for RelocateConfig {
    fn default() -> Self {
        Self {
            subfolder: "duplicates".to_string(),
            on_conflict: ConflictPolicy::default(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("text", "json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_policy_display() {
        assert_eq!(ConflictPolicy::Overwrite.to_string(), "overwrite");
        assert_eq!(ConflictPolicy::default().to_string(), "rename");
    }

    #[test]
    fn test_default_extensions() {
        let config = ScanConfig::default();
        assert_eq!(config.extensions, vec!["jpg", "jpeg", "png", "webp"]);
        assert_eq!(config.parallel_workers, 0);
        assert!(config.worker_count() > 0);
    }

    #[test]
    fn test_explicit_worker_count_is_kept() {
        let config = ScanConfig {
            parallel_workers: 3,
            ..ScanConfig::default()
        };
        assert_eq!(config.worker_count(), 3);
    }
}
