//! The `twinpix scan` command: find duplicates and report them.

use clap::Args;
use std::path::{Path, PathBuf};

use twinpix_core::{Config, ReportRecord, ScanOrder, ScanReport, Scanner};

use super::report::{create_progress_bar, emit_text, render_scan, write_records};
use super::types::OutputFormat;

/// Arguments for the `scan` command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Directory to scan (subdirectories are not scanned)
    #[arg(required = true)]
    pub dir: PathBuf,

    /// Report format (defaults to `output.format` from the config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fingerprint resolution; fingerprints have hash_size² bits
    #[arg(long)]
    pub hash_size: Option<u32>,

    /// Number of hashing workers (0 uses every available core)
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Classify files in raw directory-listing order instead of sorted by name
    #[arg(long)]
    pub listing_order: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl ScanArgs {
    /// Fold command-line overrides into `config` and re-validate it.
    pub fn apply(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(hash_size) = self.hash_size {
            config.hashing.hash_size = hash_size;
        }
        if let Some(parallel) = self.parallel {
            config.scan.parallel_workers = parallel;
        }
        if self.listing_order {
            config.scan.order = ScanOrder::Listing;
        }
        config.validate()?;
        Ok(())
    }

    /// Scan directory with `~` expanded. Non-UTF-8 paths are used as given.
    pub fn directory(&self) -> PathBuf {
        match self.dir.to_str() {
            Some(raw) => twinpix_core::config::expand_path(raw),
            None => self.dir.clone(),
        }
    }

    /// Report format after config defaults.
    pub fn resolved_format(&self, config: &Config) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from_config(&config.output.format))
    }
}

/// Execute the scan command.
pub fn execute(args: ScanArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply(&mut config)?;
    let dir = args.directory();
    let scanner = Scanner::new(&config)?;

    let report = run_scan(&scanner, &dir, !args.no_progress)?;

    let format = args.resolved_format(&config);
    match format {
        OutputFormat::Text => emit_text(&render_scan(&report), args.output.as_deref()),
        _ => write_records(
            &ReportRecord::from_scan(&report),
            format,
            config.output.pretty,
            args.output.as_deref(),
        ),
    }
}

/// Scan `dir` with a progress bar on stderr.
pub fn run_scan(scanner: &Scanner, dir: &Path, show_progress: bool) -> anyhow::Result<ScanReport> {
    let files = scanner.discover(dir)?;
    if files.is_empty() {
        tracing::warn!("No supported image files found in {:?}", dir);
    } else {
        tracing::info!("Found {} image(s) to scan", files.len());
    }

    let progress = create_progress_bar(files.len() as u64, show_progress);
    let report = scanner.scan_discovered(dir, files, |_| progress.inc(1));
    progress.finish_and_clear();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ScanArgs {
        ScanArgs {
            dir: PathBuf::from("photos"),
            format: None,
            output: None,
            hash_size: None,
            parallel: None,
            listing_order: false,
            no_progress: true,
        }
    }

    #[test]
    fn apply_overrides_config() {
        let mut config = Config::default();
        let args = ScanArgs {
            hash_size: Some(16),
            parallel: Some(2),
            listing_order: true,
            ..args()
        };
        args.apply(&mut config).unwrap();
        assert_eq!(config.hashing.hash_size, 16);
        assert_eq!(config.scan.parallel_workers, 2);
        assert_eq!(config.scan.order, ScanOrder::Listing);
    }

    #[test]
    fn apply_rejects_invalid_override() {
        let mut config = Config::default();
        let args = ScanArgs {
            hash_size: Some(1),
            ..args()
        };
        assert!(args.apply(&mut config).is_err());
    }

    #[test]
    fn format_falls_back_to_config() {
        let mut config = Config::default();
        config.output.format = "jsonl".to_string();
        assert_eq!(args().resolved_format(&config), OutputFormat::Jsonl);

        let explicit = ScanArgs {
            format: Some(OutputFormat::Json),
            ..args()
        };
        assert_eq!(explicit.resolved_format(&config), OutputFormat::Json);
    }

    #[test]
    fn directory_passes_plain_paths_through() {
        assert_eq!(args().directory(), PathBuf::from("photos"));
    }

    #[cfg(unix)]
    #[test]
    fn directory_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = PathBuf::from(OsStr::from_bytes(b"/tmp/caf\xe9"));
        let args = ScanArgs {
            dir: raw.clone(),
            ..args()
        };
        assert_eq!(args.directory(), raw);
    }

    #[test]
    fn run_scan_on_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = Scanner::new(&Config::default()).unwrap();
        let report = run_scan(&scanner, dir.path(), false).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn run_scan_missing_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = Scanner::new(&Config::default()).unwrap();
        assert!(run_scan(&scanner, &dir.path().join("missing"), false).is_err());
    }
}
