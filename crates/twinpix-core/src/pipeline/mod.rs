//! Duplicate-detection pipeline.
//!
//! - **decode**: Load and decode images, sniffing the format from content
//! - **hash**: Perceptual fingerprints (DCT / median)
//! - **discovery**: Find eligible image files directly inside a directory
//! - **scanner**: Hash every file and split originals from duplicates
//! - **relocate**: Move duplicates into a subfolder

pub mod decode;
pub mod discovery;
pub mod hash;
pub mod relocate;
pub mod scanner;

// Re-exports for convenient access
pub use discovery::{FileDiscovery, ImageFile};
pub use hash::{compute_fingerprint, Fingerprint, Hasher, DEFAULT_HASH_SIZE};
pub use relocate::{relocate, Relocator};
pub use scanner::{classify, scan, Scanner};
