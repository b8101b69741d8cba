//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// Largest accepted `hashing.hash_size`. The DCT grid is four times wider.
pub const MAX_HASH_SIZE: u32 = 64;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hashing.hash_size < 2 || self.hashing.hash_size > MAX_HASH_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "hashing.hash_size must be between 2 and {MAX_HASH_SIZE}"
            )));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "scan.extensions must not be empty".into(),
            ));
        }
        if self
            .scan
            .extensions
            .iter()
            .any(|ext| normalize_extension(ext).is_empty())
        {
            return Err(ConfigError::ValidationError(
                "scan.extensions entries must not be empty".into(),
            ));
        }
        if !is_plain_dir_name(&self.relocate.subfolder) {
            return Err(ConfigError::ValidationError(
                "relocate.subfolder must be a single directory name".into(),
            ));
        }
        if !matches!(self.output.format.as_str(), "text" | "json" | "jsonl") {
            return Err(ConfigError::ValidationError(
                "output.format must be one of: text, json, jsonl".into(),
            ));
        }
        Ok(())
    }
}

/// Lowercase an extension and drop any leading dots (`.JPG` -> `jpg`).
pub fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// True for a single path component that names a child directory.
///
/// Rejects empty names, `.`, `..` and anything containing a separator.
pub fn is_plain_dir_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_tiny_hash_size() {
        let mut config = Config::default();
        config.hashing.hash_size = 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hash_size"));
    }

    #[test]
    fn test_validate_rejects_huge_hash_size() {
        let mut config = Config::default();
        config.hashing.hash_size = MAX_HASH_SIZE + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_parallel_workers_means_auto() {
        let mut config = Config::default();
        config.scan.parallel_workers = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = Config::default();
        config.scan.extensions.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("extensions"));
    }

    #[test]
    fn test_validate_accepts_dotted_extension() {
        let mut config = Config::default();
        config.scan.extensions.push(".gif".to_string());
        assert!(config.validate().is_ok());

        config.scan.extensions.push(".".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".JPG"), "jpg");
        assert_eq!(normalize_extension("webp"), "webp");
        assert_eq!(normalize_extension("."), "");
    }

    #[test]
    fn test_plain_dir_name() {
        assert!(is_plain_dir_name("duplicates"));
        assert!(is_plain_dir_name(".dupes"));
        for bad in ["", ".", "..", "a/b", "a\\b", "/abs"] {
            assert!(!is_plain_dir_name(bad), "{bad:?}");
        }
    }

    #[test]
    fn test_validate_rejects_nested_subfolder() {
        let mut config = Config::default();
        config.relocate.subfolder = "dupes/nested".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("subfolder"));

        config.relocate.subfolder = "..".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_output_format() {
        let mut config = Config::default();
        config.output.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.format"));
    }
}
