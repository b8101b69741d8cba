//! Interactive CLI mode: guided experience for bare `twinpix` invocation.
//!
//! Pick a folder, review the duplicates found in it, optionally move them
//! into the duplicates subfolder, and see the refreshed result. Uses the same
//! scanner and relocator as the flag-based commands.

pub mod theme;

use console::Style;
use dialoguer::{Confirm, Input, Select};
use twinpix_core::{Config, Relocator, Scanner};

use super::report::{headline, render_relocation, render_scan};
use super::scan::run_scan;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Main menu options presented to the user.
const MENU_ITEMS: &[&str] = &["Scan a folder", "Show configuration", "Exit"];

/// Entry point for interactive mode.
pub fn run(config: &Config) -> anyhow::Result<()> {
    theme::print_banner();

    let theme = theme::twinpix_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => guided_scan(config)?,
            Some(1) => show_config(config),
            Some(2) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// Folder prompt → scan → review → optional move → refreshed scan.
fn guided_scan(config: &Config) -> anyhow::Result<()> {
    let theme = theme::twinpix_theme();
    let warn = Style::new().for_stderr().yellow();
    let scanner = Scanner::new(config)?;

    let dir = loop {
        let Some(raw_path) = handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Folder to scan")
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        let path = twinpix_core::config::expand_path(raw_path.trim());
        if !path.is_dir() {
            eprintln!(
                "  {}",
                warn.apply_to(format!("Not a folder: {}", path.display()))
            );
            continue;
        }
        break path;
    };

    let report = match run_scan(&scanner, &dir, true) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("  {}", warn.apply_to(format!("Scan failed: {e}")));
            return Ok(());
        }
    };

    eprintln!();
    headline(&report);
    eprintln!("{}", indent(&render_scan(&report)));

    if report.is_clean() {
        return Ok(());
    }

    let relocator = Relocator::new(&config.relocate);
    let prompt = format!(
        "Move {} duplicate(s) to '{}'?",
        report.duplicates.len(),
        config.relocate.subfolder
    );
    let confirmed = Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(false)
        .interact_opt()?
        .unwrap_or(false);
    if !confirmed {
        return Ok(());
    }

    let relocation = relocator.relocate(&report.duplicate_paths(), &dir)?;
    eprintln!("{}", indent(&render_relocation(&relocation)));

    let refreshed = run_scan(&scanner, &dir, true)?;
    headline(&refreshed);
    eprintln!();
    Ok(())
}

/// Short summary of the settings that affect a scan.
fn show_config(config: &Config) {
    let dim = Style::new().for_stderr().dim();
    let label = Style::new().for_stderr().bold();
    let config_path = Config::default_path();
    let path_note = if config_path.exists() {
        "(exists)"
    } else {
        "(using defaults)"
    };

    eprintln!();
    eprintln!(
        "    {:<16} {} {}",
        label.apply_to("Config file:"),
        config_path.display(),
        dim.apply_to(path_note)
    );
    eprintln!(
        "    {:<16} {} ({} bits)",
        label.apply_to("Hash size:"),
        config.hashing.hash_size,
        config.hashing.hash_size * config.hashing.hash_size
    );
    eprintln!(
        "    {:<16} {}",
        label.apply_to("Extensions:"),
        config.scan.extensions.join(", ")
    );
    eprintln!(
        "    {:<16} {} workers",
        label.apply_to("Parallel:"),
        config.scan.worker_count()
    );
    eprintln!(
        "    {:<16} {} (on conflict: {})",
        label.apply_to("Subfolder:"),
        config.relocate.subfolder,
        config.relocate.on_conflict
    );
    eprintln!();
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb"), "  a\n\n  b");
    }

    #[test]
    fn interrupt_maps_to_none() {
        let err = dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::Interrupted,
            "ctrl-c",
        ));
        let result: anyhow::Result<Option<()>> = handle_interrupt(Err(err));
        assert!(result.unwrap().is_none());
    }
}
