//! twinpix core: perceptual duplicate detection for a folder of images.
//!
//! A scan lists the image files directly inside one directory, computes a
//! perceptual fingerprint for each, and marks every file whose fingerprint
//! was already seen as a duplicate of the first file that produced it. The
//! duplicates can then be moved into a subfolder.
//!
//! ```text
//! Directory → Discover → Decode → Fingerprint → Classify → (Relocate)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use twinpix_core::{Config, Relocator, Scanner};
//!
//! fn main() -> twinpix_core::Result<()> {
//!     let config = Config::load()?;
//!     let scanner = Scanner::new(&config)?;
//!
//!     let dir = Path::new("./photos");
//!     let report = scanner.scan(dir)?;
//!     println!("{} duplicate(s)", report.duplicates.len());
//!
//!     let moved = Relocator::new(&config.relocate).relocate(&report.duplicate_paths(), dir)?;
//!     println!("moved {}", moved.moved_count());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-exports for convenient access
pub use config::{Config, ConflictPolicy, ScanOrder};
pub use error::{ConfigError, RelocateError, Result, ScanError, TwinpixError};
pub use output::{OutputFormat, OutputWriter, ReportRecord};
pub use pipeline::{Fingerprint, Hasher, ImageFile, Relocator, Scanner};
pub use types::{Duplicate, FingerprintIndex, MovedFile, RelocationReport, ScanReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::block_noise;
    use std::fs;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_scan_relocate_rescan() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jpg");
        block_noise(77, 120, 90).save(&a).unwrap();
        fs::copy(&a, dir.path().join("b.jpg")).unwrap();
        block_noise(78, 120, 90).save(dir.path().join("c.png")).unwrap();

        let config = Config::default();
        let scanner = Scanner::new(&config).unwrap();
        let report = scanner.scan(dir.path()).unwrap();
        assert_eq!(report.duplicate_paths(), vec![dir.path().join("b.jpg")]);

        let relocation = Relocator::new(&config.relocate)
            .relocate(&report.duplicate_paths(), dir.path())
            .unwrap();
        assert_eq!(relocation.moved_count(), 1);
        assert!(dir.path().join("duplicates").join("b.jpg").is_file());
        assert!(a.is_file());

        // The subfolder is not scanned, so the moved file disappears
        let rescan = scanner.scan(dir.path()).unwrap();
        assert!(rescan.is_clean());
        assert_eq!(rescan.files_scanned, 2);
    }
}
