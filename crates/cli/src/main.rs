//! bakrot - grandfather-father-son cleanup for dated backup files

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli_lib::run::{self, RunOptions};
use cli_lib::{logging, system_config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Keep recent backups, one per week and one per month; delete the rest
#[derive(Parser)]
#[command(name = "bakrot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the backup files (not searched recursively)
    #[arg(required_unless_present = "print_config")]
    dir: Option<PathBuf>,

    /// Configuration file (default: <config dir>/bakrot/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log what would be deleted without removing anything
    #[arg(long)]
    dry_run: bool,

    /// Run as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = system_config::load(cli.config.as_deref())?;

    if cli.print_config {
        if system_config::has_config_file(cli.config.as_deref()) {
            print!("{}", system_config::to_toml(&config)?);
        } else {
            print!("{}", system_config::example_config());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let dir = cli.dir.context("Pass directory path via args")?;

    let _log_guard = logging::init(&config.log_dir(), config.debug_mode)?;

    let options = RunOptions {
        dir,
        today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
        dry_run: cli.dry_run,
    };

    match run::run(&config, &options) {
        Ok(report) => {
            run::print_report(&report, options.dry_run);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("{:#}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
