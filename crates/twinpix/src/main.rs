//! twinpix CLI - find perceptual duplicates in a folder of images.
//!
//! twinpix hashes every image directly inside a folder, flags later files
//! whose fingerprint matches an earlier one, and can move those duplicates
//! into a subfolder.
//!
//! # Usage
//!
//! ```bash
//! # List duplicates in a folder
//! twinpix scan ~/Pictures/holiday
//!
//! # Machine-readable report
//! twinpix scan ~/Pictures/holiday --format jsonl --output dupes.jsonl
//!
//! # Move duplicates into ~/Pictures/holiday/duplicates
//! twinpix move ~/Pictures/holiday
//!
//! # Guided mode
//! twinpix
//! ```

use clap::{CommandFactory, Parser, Subcommand};

mod cli;
mod logging;

/// twinpix - find and set aside duplicate images.
#[derive(Parser, Debug)]
#[command(name = "twinpix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Without a subcommand, twinpix starts in interactive mode
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a folder and report duplicate images
    Scan(cli::scan::ScanArgs),

    /// Scan a folder and move duplicates into a subfolder
    #[command(name = "move")]
    Move(cli::relocate::MoveArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match twinpix_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `twinpix config path`."
            );
            twinpix_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("twinpix v{}", twinpix_core::VERSION);

    match cli.command {
        Some(Commands::Scan(args)) => cli::scan::execute(args, config),
        Some(Commands::Move(args)) => cli::relocate::execute(args, config),
        Some(Commands::Config(args)) => cli::config::execute(args, &config),
        None if console::Term::stderr().is_term() => cli::interactive::run(&config),
        None => {
            Cli::command().print_help()?;
            anyhow::bail!("no command given and stderr is not a terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn move_subcommand_parses_scan_flags() {
        let cli = Cli::try_parse_from([
            "twinpix",
            "move",
            "/tmp/photos",
            "--on-conflict",
            "fail",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Move(args)) => {
                assert!(args.dry_run);
                assert_eq!(args.scan.dir, std::path::PathBuf::from("/tmp/photos"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["twinpix", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }
}
