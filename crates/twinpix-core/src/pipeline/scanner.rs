//! Duplicate scanning: discover, fingerprint, classify.
//!
//! Hashing runs on a bounded rayon pool, but results are gathered back in
//! discovery order before classification. The first file seen for a
//! fingerprint is the original and every later one is a duplicate, exactly as
//! if the files had been hashed one after another.
//!
//! With `ScanOrder::Listing` the discovery order is whatever the OS returns,
//! so when two or more files share a fingerprint, which of them is kept as
//! the original may change between platforms or runs. `ScanOrder::Sorted`
//! (the default) makes it reproducible.

use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use crate::config::{Config, ScanConfig};
use crate::error::{ConfigError, ScanError};
use crate::types::{Duplicate, FingerprintIndex, ScanReport};

use super::discovery::{FileDiscovery, ImageFile};
use super::hash::{Fingerprint, Hasher};

/// Result of hashing one discovered file.
pub type HashOutcome = (ImageFile, Result<Fingerprint, ScanError>);

/// Scans a directory for perceptual duplicates.
pub struct Scanner {
    hasher: Hasher,
    discovery: FileDiscovery,
    pool: rayon::ThreadPool,
}

impl Scanner {
    /// Create a scanner from the hashing and scan sections of `config`.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_parts(Hasher::new(config.hashing.hash_size)?, &config.scan)
    }

    /// Create a scanner from an explicit hasher and scan settings.
    ///
    /// `scan.parallel_workers = 0` sizes the pool to the available cores.
    pub fn with_parts(hasher: Hasher, scan: &ScanConfig) -> Result<Self, ConfigError> {
        let workers = scan.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("twinpix-hash-{i}"))
            .build()
            .map_err(|e| {
                ConfigError::ValidationError(format!(
                    "cannot start {workers} hashing workers: {e}"
                ))
            })?;
        tracing::debug!("Hashing with {} worker(s)", workers);
        Ok(Self {
            hasher,
            discovery: FileDiscovery::new(scan),
            pool,
        })
    }

    /// List the eligible files in `dir` without hashing them.
    pub fn discover(&self, dir: &Path) -> Result<Vec<ImageFile>, ScanError> {
        self.discovery.discover(dir)
    }

    /// Scan `dir` and classify every eligible file.
    pub fn scan(&self, dir: &Path) -> Result<ScanReport, ScanError> {
        self.scan_with_progress(dir, |_| {})
    }

    /// Scan `dir`, calling `on_file` after each file has been hashed.
    ///
    /// `on_file` may be called from worker threads and in any order.
    pub fn scan_with_progress<F>(&self, dir: &Path, on_file: F) -> Result<ScanReport, ScanError>
    where
        F: Fn(&ImageFile) + Sync,
    {
        let files = self.discovery.discover(dir)?;
        Ok(self.scan_discovered(dir, files, on_file))
    }

    /// Hash and classify files already discovered in `dir`.
    ///
    /// `files` are classified in the order given.
    pub fn scan_discovered<F>(&self, dir: &Path, files: Vec<ImageFile>, on_file: F) -> ScanReport
    where
        F: Fn(&ImageFile) + Sync,
    {
        let start = Instant::now();
        let outcomes = self.hash_files(files, &on_file);
        let report = classify(dir, outcomes);

        tracing::info!(
            "Scanned {} file(s) in {:?}: {} unique, {} duplicate(s), {} failed",
            report.files_scanned,
            start.elapsed(),
            report.index.len(),
            report.duplicates.len(),
            report.failures.len()
        );
        report
    }

    /// Fingerprint `files` on the worker pool, preserving input order.
    pub fn hash_files<F>(&self, files: Vec<ImageFile>, on_file: &F) -> Vec<HashOutcome>
    where
        F: Fn(&ImageFile) + Sync,
    {
        self.pool.install(|| {
            files
                .into_par_iter()
                .map(|file| {
                    let result = self.hasher.compute_fingerprint(&file.path);
                    if let Ok(ref fp) = result {
                        tracing::debug!("{:?} -> {}", file.path, fp);
                    }
                    on_file(&file);
                    (file, result)
                })
                .collect()
        })
    }
}

/// Classify hashed files in the order given.
///
/// Failed files are recorded and skipped. A fingerprint already in the index
/// marks the file as a duplicate of the indexed path.
pub fn classify(dir: &Path, outcomes: Vec<HashOutcome>) -> ScanReport {
    let files_scanned = outcomes.len();
    let mut index = FingerprintIndex::new();
    let mut duplicates = Vec::new();
    let mut failures = Vec::new();

    for (file, result) in outcomes {
        match result {
            Ok(fingerprint) => {
                if let Some(original) = index.insert_or_original(fingerprint.clone(), &file.path)
                {
                    tracing::debug!("Duplicate: {:?} matches {:?}", file.path, original);
                    duplicates.push(Duplicate {
                        path: file.path,
                        original,
                        fingerprint,
                    });
                }
            }
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", file.path, e);
                failures.push(e);
            }
        }
    }

    ScanReport {
        directory: dir.to_path_buf(),
        files_scanned,
        index,
        duplicates,
        failures,
    }
}

/// Scan `dir` with the default hash size, keeping only files whose extension
/// is in `extensions` (`"jpg"` and `".jpg"` are equivalent).
pub fn scan(dir: &Path, extensions: &[&str]) -> crate::Result<ScanReport> {
    let mut config = Config::default();
    config.scan.extensions = extensions.iter().map(|e| e.to_string()).collect();
    config.validate()?;
    let scanner = Scanner::new(&config)?;
    Ok(scanner.scan(dir)?)
}
