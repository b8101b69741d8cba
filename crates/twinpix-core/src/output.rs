//! Output formatting for JSON and JSONL reports.
//!
//! Scan and relocation reports are flattened into `ReportRecord`s, which the
//! writer emits either as one JSON array or as one object per line.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::types::{RelocationReport, ScanReport};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single JSON object or array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

/// A writer that serializes items to JSON or JSONL format.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The underlying writer (file, stdout, etc.)
    /// * `format` - Output format (JSON or JSONL)
    /// * `pretty` - Whether to pretty-print JSON (only affects JSON format)
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    /// Write a single item.
    ///
    /// For JSON format, writes a single object.
    /// For JSONL format, writes one object per line.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, item)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
            }
            OutputFormat::JsonLines => {
                // JSONL is never pretty-printed (one object per line)
                serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    /// Write multiple items.
    ///
    /// For JSON format, writes as a JSON array.
    /// For JSONL format, writes one object per line.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut self.writer, items)
                        .map_err(io::Error::other)?;
                } else {
                    serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
                }
                writeln!(self.writer)?;
            }
            OutputFormat::JsonLines => {
                for item in items {
                    self.write(item)?;
                }
            }
        }
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// One line of machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportRecord {
    /// A file classified as a duplicate
    Duplicate {
        path: PathBuf,
        original: PathBuf,
        fingerprint: String,
    },
    /// A file that could not be decoded or moved
    Failure { path: PathBuf, message: String },
    /// A file that was moved
    Moved { from: PathBuf, to: PathBuf },
    /// Totals for one scan, plus the move count when a relocation ran
    Summary {
        directory: PathBuf,
        files_scanned: usize,
        unique: usize,
        duplicates: usize,
        failures: usize,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        moved: Option<usize>,
    },
}

impl ReportRecord {
    /// Flatten a scan report: duplicates, then failures, then a summary.
    pub fn from_scan(report: &ScanReport) -> Vec<Self> {
        let mut records: Vec<Self> = report
            .duplicates
            .iter()
            .map(|d| Self::Duplicate {
                path: d.path.clone(),
                original: d.original.clone(),
                fingerprint: d.fingerprint.to_hex(),
            })
            .collect();
        records.extend(report.failures.iter().map(|e| Self::Failure {
            path: e.path().to_path_buf(),
            message: e.to_string(),
        }));
        records.push(Self::scan_summary(report, None));
        records
    }

    /// Flatten a relocation: moves, then per-file failures.
    pub fn from_relocation(report: &RelocationReport) -> Vec<Self> {
        let mut records: Vec<Self> = report
            .moved
            .iter()
            .map(|m| Self::Moved {
                from: m.from.clone(),
                to: m.to.clone(),
            })
            .collect();
        records.extend(report.failures.iter().map(|e| Self::Failure {
            path: e.path().to_path_buf(),
            message: e.to_string(),
        }));
        records
    }

    /// Summary record for a scan, optionally carrying a move count.
    pub fn scan_summary(report: &ScanReport, moved: Option<usize>) -> Self {
        Self::Summary {
            directory: report.directory.clone(),
            files_scanned: report.files_scanned,
            unique: report.index.len(),
            duplicates: report.duplicates.len(),
            failures: report.failures.len(),
            moved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::pipeline::Fingerprint;
    use crate::types::{Duplicate, FingerprintIndex};
    use std::path::Path;

    fn sample_report() -> ScanReport {
        let fp = Fingerprint::from_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mut index = FingerprintIndex::new();
        index.insert_or_original(fp.clone(), Path::new("dir/a.jpg"));
        ScanReport {
            directory: PathBuf::from("dir"),
            files_scanned: 3,
            index,
            duplicates: vec![Duplicate {
                path: PathBuf::from("dir/b.jpg"),
                original: PathBuf::from("dir/a.jpg"),
                fingerprint: fp,
            }],
            failures: vec![ScanError::Decode {
                path: PathBuf::from("dir/c.jpg"),
                message: "truncated".to_string(),
            }],
        }
    }

    #[test]
    fn test_write_json() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, false);

        let record = ReportRecord::Failure {
            path: PathBuf::from("x.png"),
            message: "bad".to_string(),
        };
        writer.write(&record).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\"type\":\"failure\""));
        assert!(output.contains("\"path\":\"x.png\""));
    }

    #[test]
    fn test_scan_report_as_jsonl() {
        let records = ReportRecord::from_scan(&sample_report());
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::JsonLines, true);
        writer.write_all(&records).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.trim().split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("0102030405060708"));

        let summary: ReportRecord = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(
            summary,
            ReportRecord::Summary {
                directory: PathBuf::from("dir"),
                files_scanned: 3,
                unique: 1,
                duplicates: 1,
                failures: 1,
                moved: None,
            }
        );
    }

    #[test]
    fn test_write_all_json_array() {
        let mut buffer = Vec::new();
        let mut writer = OutputWriter::new(&mut buffer, OutputFormat::Json, false);
        writer
            .write_all(&ReportRecord::from_scan(&sample_report()))
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with('['));
        assert!(output.trim().ends_with(']'));
    }

    #[test]
    fn test_relocation_records() {
        let report = RelocationReport {
            destination: PathBuf::from("dir/duplicates"),
            moved: vec![crate::types::MovedFile {
                from: PathBuf::from("dir/b.jpg"),
                to: PathBuf::from("dir/duplicates/b.jpg"),
            }],
            failures: vec![],
        };
        let records = ReportRecord::from_relocation(&report);
        assert!(matches!(records.as_slice(), [ReportRecord::Moved { .. }]));
    }
}
