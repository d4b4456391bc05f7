// lexclean/src/main.rs
//! lexclean entry point.
//!
//! Exit codes: 0 on success, 1 when `scan --fail-on-match` found the term,
//! 2 on any error.

use clap::Parser;
use log::debug;
use std::process::ExitCode;

use lexclean::cli::{Cli, Commands};
use lexclean::commands::{catalog, error_msg, filter, scan};
use lexclean::logger;
use lexclean::ui::theme::{build_theme_map, ThemeMap};

fn run(cli: &Cli, theme: &ThemeMap) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Scan(cmd) => {
            let matched = scan::run_scan(cmd, theme, cli.quiet)?;
            if matched && cmd.fail_on_match {
                debug!("Contamination found with --fail-on-match. Exiting with code 1.");
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Filter(cmd) => {
            filter::run_filter(cmd, theme, cli.quiet)?;
        }
        Commands::Catalog(cmd) => {
            catalog::run_catalog(cmd, theme)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug, cli.disable_debug));
    let theme = build_theme_map();

    match run(&cli, &theme) {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme);
            ExitCode::from(2)
        }
    }
}
