//! Progress bar and report rendering shared by the scan and move commands.

use console::Style;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use twinpix_core::{OutputWriter, RelocationReport, ReportRecord, ScanReport};

use super::types::OutputFormat;

/// Create a progress bar for hashing `total` files.
pub fn create_progress_bar(total: u64, enabled: bool) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("hashing...");
    pb
}

/// Write machine-readable records to `output` or stdout.
pub fn write_records(
    records: &[ReportRecord],
    format: OutputFormat,
    pretty: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let Some(core_format) = format.as_core() else {
        anyhow::bail!("text output is not a record format");
    };

    match output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = OutputWriter::new(BufWriter::new(file), core_format, pretty);
            writer.write_all(records)?;
            writer.flush()?;
            tracing::info!("Output written to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = OutputWriter::new(stdout.lock(), core_format, pretty);
            writer.write_all(records)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Render a scan report for humans.
pub fn render_scan(report: &ScanReport) -> String {
    let mut out = String::new();

    if report.duplicates.is_empty() {
        out.push_str("No duplicates found.\n");
    } else {
        out.push_str(&format!("Found {} duplicate(s):\n", report.duplicates.len()));
        for duplicate in &report.duplicates {
            out.push_str(&format!(
                "  {}  (same as {})\n",
                display_name(&duplicate.path),
                display_name(&duplicate.original)
            ));
        }
    }

    if !report.failures.is_empty() {
        out.push_str(&format!(
            "\nCould not read {} file(s):\n",
            report.failures.len()
        ));
        for failure in &report.failures {
            out.push_str(&format!("  {}\n", failure));
        }
    }

    out.push_str(&format!(
        "\n{} scanned, {} unique, {} duplicate(s), {} failed in {}\n",
        report.files_scanned,
        report.index.len(),
        report.duplicates.len(),
        report.failures.len(),
        report.directory.display()
    ));
    out
}

/// Render a relocation report for humans.
pub fn render_relocation(report: &RelocationReport) -> String {
    let mut out = format!(
        "Moved {} duplicate file(s) to '{}'.\n",
        report.moved_count(),
        report.destination.display()
    );
    for moved in &report.moved {
        if moved.from.file_name() != moved.to.file_name() {
            out.push_str(&format!(
                "  {} -> {}\n",
                display_name(&moved.from),
                display_name(&moved.to)
            ));
        }
    }
    if !report.failures.is_empty() {
        out.push_str(&format!("\nCould not move {} file(s):\n", report.failures.len()));
        for failure in &report.failures {
            out.push_str(&format!("  {}\n", failure));
        }
    }
    out
}

/// Print text to stdout, or to a file when `output` is set.
pub fn emit_text(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!("Output written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Print a one-line coloured headline to stderr.
pub fn headline(report: &ScanReport) {
    if report.duplicates.is_empty() {
        let green = Style::new().for_stderr().green();
        eprintln!("  {} No duplicates found.", green.apply_to("✓"));
    } else {
        let yellow = Style::new().for_stderr().yellow();
        eprintln!(
            "  {} Found {} duplicate(s).",
            yellow.apply_to("!"),
            report.duplicates.len()
        );
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
