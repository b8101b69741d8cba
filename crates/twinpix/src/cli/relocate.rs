//! The `twinpix move` command: scan, move duplicates aside, re-scan.

use clap::Args;

use twinpix_core::{Config, Relocator, ReportRecord, Scanner};

use super::report::{emit_text, render_relocation, render_scan, write_records};
use super::scan::{run_scan, ScanArgs};
use super::types::{OnConflict, OutputFormat};

/// Arguments for the `move` command.
#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Subfolder (inside the scanned directory) to move duplicates into
    #[arg(long)]
    pub subfolder: Option<String>,

    /// What to do when the subfolder already has a file with the same name
    #[arg(long, value_enum)]
    pub on_conflict: Option<OnConflict>,

    /// Only report what would be moved
    #[arg(long)]
    pub dry_run: bool,
}

impl MoveArgs {
    /// Fold command-line overrides into `config` and re-validate it.
    pub fn apply(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(ref subfolder) = self.subfolder {
            config.relocate.subfolder = subfolder.clone();
        }
        if let Some(policy) = self.on_conflict {
            config.relocate.on_conflict = policy.into();
        }
        self.scan.apply(config)
    }
}

/// Execute the move command.
pub fn execute(args: MoveArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply(&mut config)?;
    let dir = args.scan.directory();
    let format = args.scan.resolved_format(&config);
    let output = args.scan.output.as_deref();
    let show_progress = !args.scan.no_progress;

    let scanner = Scanner::new(&config)?;
    let relocator = Relocator::new(&config.relocate);

    let report = run_scan(&scanner, &dir, show_progress)?;

    if report.is_clean() || args.dry_run {
        if args.dry_run && !report.is_clean() {
            tracing::info!(
                "Dry run: {} file(s) would be moved to {:?} (on conflict: {})",
                report.duplicates.len(),
                relocator.destination(&dir),
                relocator.policy()
            );
        }
        return match format {
            OutputFormat::Text => emit_text(&render_scan(&report), output),
            _ => write_records(
                &ReportRecord::from_scan(&report),
                format,
                config.output.pretty,
                output,
            ),
        };
    }

    let relocation = relocator.relocate(&report.duplicate_paths(), &dir)?;

    // Refresh, as the moved files are now out of the scanned directory
    let after = run_scan(&scanner, &dir, show_progress)?;

    match format {
        OutputFormat::Text => {
            let mut text = render_relocation(&relocation);
            text.push('\n');
            text.push_str(&render_scan(&after));
            emit_text(&text, output)
        }
        _ => {
            let mut records = ReportRecord::from_relocation(&relocation);
            records.push(ReportRecord::scan_summary(
                &after,
                Some(relocation.moved_count()),
            ));
            write_records(&records, format, config.output.pretty, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use twinpix_core::ConflictPolicy;

    fn move_args(dir: PathBuf, output: Option<PathBuf>) -> MoveArgs {
        MoveArgs {
            scan: ScanArgs {
                dir,
                format: Some(OutputFormat::Jsonl),
                output,
                hash_size: None,
                parallel: Some(2),
                listing_order: false,
                no_progress: true,
            },
            subfolder: None,
            on_conflict: None,
            dry_run: false,
        }
    }

    /// Blocky pattern whose layout depends on `seed`.
    fn write_png(path: &std::path::Path, seed: u32) {
        image::RgbImage::from_fn(64, 64, |x, y| {
            let cell = (x / 8) * 8 + y / 8 + seed * 31;
            let v = (cell.wrapping_mul(2_654_435_761) >> 24) as u8;
            image::Rgb([v, v / 2, 255 - v])
        })
        .save(path)
        .unwrap();
    }

    #[test]
    fn apply_overrides_relocation() {
        let mut config = Config::default();
        let args = MoveArgs {
            subfolder: Some("dupes".to_string()),
            on_conflict: Some(OnConflict::Fail),
            ..move_args(PathBuf::from("x"), None)
        };
        args.apply(&mut config).unwrap();
        assert_eq!(config.relocate.subfolder, "dupes");
        assert_eq!(config.relocate.on_conflict, ConflictPolicy::Fail);
    }

    #[test]
    fn apply_rejects_nested_subfolder() {
        let mut config = Config::default();
        let args = MoveArgs {
            subfolder: Some("a/b".to_string()),
            ..move_args(PathBuf::from("x"), None)
        };
        assert!(args.apply(&mut config).is_err());
    }

    #[test]
    fn move_relocates_duplicates_and_rescans() {
        let dir = tempfile::tempdir().unwrap();
        let photos = dir.path().join("photos");
        std::fs::create_dir(&photos).unwrap();
        write_png(&photos.join("a.png"), 0);
        write_png(&photos.join("b.png"), 0);
        write_png(&photos.join("c.png"), 1);
        let out = dir.path().join("report.jsonl");

        execute(move_args(photos.clone(), Some(out.clone())), Config::default()).unwrap();

        assert!(photos.join("a.png").is_file());
        assert!(photos.join("duplicates").join("b.png").is_file());
        assert!(!photos.join("b.png").exists());

        let content = std::fs::read_to_string(&out).unwrap();
        let records: Vec<ReportRecord> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert!(matches!(records[0], ReportRecord::Moved { .. }));
        assert!(matches!(
            records.last(),
            Some(ReportRecord::Summary {
                duplicates: 0,
                moved: Some(1),
                ..
            })
        ));
    }

    #[test]
    fn dry_run_moves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 0);
        write_png(&dir.path().join("b.png"), 0);
        let out = dir.path().join("report.json");

        let args = MoveArgs {
            dry_run: true,
            ..move_args(dir.path().to_path_buf(), Some(out))
        };
        execute(args, Config::default()).unwrap();

        assert!(dir.path().join("b.png").is_file());
        assert!(!dir.path().join("duplicates").exists());
    }
}
