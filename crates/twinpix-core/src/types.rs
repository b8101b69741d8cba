//! Result types produced by scanning and relocation.
//!
//! These are plain values: every scan builds a fresh `ScanReport`, and the
//! presentation layer keeps whichever report it last received.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{RelocateError, ScanError};
use crate::pipeline::Fingerprint;

/// One fingerprint and the first path that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub fingerprint: Fingerprint,
    pub path: PathBuf,
}

/// Mapping from fingerprint to first-seen path, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<IndexEntry>", into = "Vec<IndexEntry>")]
pub struct FingerprintIndex {
    entries: Vec<IndexEntry>,
    positions: HashMap<Fingerprint, usize>,
}

impl FingerprintIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` as the original for `fingerprint` unless one exists.
    ///
    /// Returns the already-indexed original when the fingerprint is known,
    /// in which case the index is left unchanged.
    pub fn insert_or_original(&mut self, fingerprint: Fingerprint, path: &Path) -> Option<PathBuf> {
        if let Some(&pos) = self.positions.get(&fingerprint) {
            return Some(self.entries[pos].path.clone());
        }
        self.positions.insert(fingerprint.clone(), self.entries.len());
        self.entries.push(IndexEntry {
            fingerprint,
            path: path.to_path_buf(),
        });
        None
    }

    /// First-seen path for a fingerprint.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&Path> {
        self.positions
            .get(fingerprint)
            .map(|&pos| self.entries[pos].path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }
}

impl From<Vec<IndexEntry>> for FingerprintIndex {
    fn from(entries: Vec<IndexEntry>) -> Self {
        let mut index = FingerprintIndex::new();
        for entry in entries {
            index.insert_or_original(entry.fingerprint, &entry.path);
        }
        index
    }
}

impl From<FingerprintIndex> for Vec<IndexEntry> {
    fn from(index: FingerprintIndex) -> Self {
        index.entries
    }
}

/// A file whose fingerprint collided with an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duplicate {
    /// The duplicate file
    pub path: PathBuf,
    /// The first-seen file with the same fingerprint
    pub original: PathBuf,
    /// The shared fingerprint
    pub fingerprint: Fingerprint,
}

/// Outcome of scanning one directory.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// The scanned directory
    pub directory: PathBuf,

    /// Number of eligible files visited
    pub files_scanned: usize,

    /// Fingerprint to first-seen path
    pub index: FingerprintIndex,

    /// Duplicates in discovery order
    pub duplicates: Vec<Duplicate>,

    /// Per-file decode failures; these files are neither indexed nor duplicates
    pub failures: Vec<ScanError>,
}

impl ScanReport {
    /// Paths of all duplicates, in discovery order.
    pub fn duplicate_paths(&self) -> Vec<PathBuf> {
        self.duplicates.iter().map(|d| d.path.clone()).collect()
    }

    /// True when no duplicates were found.
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }
}

/// A file that was moved, and where it ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Outcome of relocating a batch of duplicates.
#[derive(Debug, Clone, Serialize)]
pub struct RelocationReport {
    /// The subfolder files were moved into
    pub destination: PathBuf,

    /// Successful moves, in request order
    pub moved: Vec<MovedFile>,

    /// Per-file failures; these files were left in place
    pub failures: Vec<RelocateError>,
}

impl RelocationReport {
    /// Number of files actually moved.
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(byte: u8) -> Fingerprint {
        Fingerprint::from_bytes(&[byte; 8])
    }

    #[test]
    fn test_index_keeps_first_path() {
        let mut index = FingerprintIndex::new();
        assert_eq!(index.insert_or_original(fp(1), Path::new("a.jpg")), None);
        assert_eq!(
            index.insert_or_original(fp(1), Path::new("b.jpg")),
            Some(PathBuf::from("a.jpg"))
        );
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&fp(1)), Some(Path::new("a.jpg")));
    }

    #[test]
    fn test_index_iterates_in_insertion_order() {
        let mut index = FingerprintIndex::new();
        index.insert_or_original(fp(9), Path::new("z.png"));
        index.insert_or_original(fp(1), Path::new("a.png"));
        index.insert_or_original(fp(5), Path::new("m.png"));

        let paths: Vec<_> = index.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("z.png"),
                PathBuf::from("a.png"),
                PathBuf::from("m.png")
            ]
        );
        assert_eq!(index.get(&fp(5)), Some(Path::new("m.png")));
        assert_eq!(index.get(&fp(2)), None);
    }

    #[test]
    fn test_index_serializes_as_entry_list() {
        let mut index = FingerprintIndex::new();
        index.insert_or_original(fp(0xab), Path::new("a.png"));

        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(json[0]["fingerprint"], "abababababababab");
        assert_eq!(json[0]["path"], "a.png");

        let back: FingerprintIndex = serde_json::from_value(json).unwrap();
        assert_eq!(back, index);
    }

    #[test]
    fn test_relocation_report_counts_only_moves() {
        let report = RelocationReport {
            destination: PathBuf::from("dir/duplicates"),
            moved: vec![MovedFile {
                from: PathBuf::from("dir/b.jpg"),
                to: PathBuf::from("dir/duplicates/b.jpg"),
            }],
            failures: vec![RelocateError::Move {
                path: PathBuf::from("dir/c.jpg"),
                message: "gone".to_string(),
            }],
        };
        assert_eq!(report.moved_count(), 1);
    }
}
