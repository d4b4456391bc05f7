// lexclean/src/commands/scan.rs
//! The `scan` command: one verdict for a file or stdin, or one per line.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use lexclean_core::{ContaminationScanner, ContaminationVerdict, Indicator};

use crate::cli::ScanCommand;
use crate::ui::report;
use crate::ui::theme::ThemeMap;
use crate::utils::config_path::resolve_catalog;
use crate::utils::input::{decode_lossy, read_input};

/// One line of `--line-buffered --json` output.
#[derive(Debug, Serialize)]
struct LineVerdict<'a> {
    line: usize,
    matched: bool,
    indicators: &'a [Indicator],
}

/// Runs the scan. Returns whether anything was contaminated.
pub fn run_scan(cmd: &ScanCommand, theme: &ThemeMap, quiet: bool) -> Result<bool> {
    info!("Starting lexclean scan.");
    let config = resolve_catalog(&cmd.catalog)?;
    let scanner = ContaminationScanner::from_config(&config)?;

    let matched = if cmd.line_buffered {
        scan_lines(&scanner, cmd, theme)?
    } else {
        let input = read_input(cmd.input_file.as_deref())?;
        debug!("Read {} bytes of input.", input.len());
        let verdict = scanner.is_contaminated(&input);
        write_verdict(&verdict, cmd.json, theme, quiet)?;
        verdict.matched
    };

    info!("Scan completed. Contaminated: {}", matched);
    Ok(matched)
}

fn write_verdict(verdict: &ContaminationVerdict, json: bool, theme: &ThemeMap, quiet: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let rendered = serde_json::to_string_pretty(verdict).context("Failed to serialize verdict")?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    writeln!(out, "{}", report::verdict_label(verdict.matched, theme, stdout.is_terminal()))?;
    if !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        report::print_indicator_table(&verdict.indicators, &mut io::stderr(), theme, stderr_supports_color)?;
    }
    Ok(())
}

/// Scans each line as it arrives and flushes a verdict for it.
fn scan_lines(scanner: &ContaminationScanner, cmd: &ScanCommand, theme: &ThemeMap) -> Result<bool> {
    let reader: Box<dyn BufRead> = match &cmd.input_file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut out = stdout.lock();
    let mut any_matched = false;

    for (number, line) in reader.split(b'\n').enumerate() {
        let bytes = line.context("Failed to read input line")?;
        let text = decode_lossy(&bytes);
        let text = text.strip_suffix('\r').unwrap_or(&text);
        let verdict = scanner.is_contaminated(text);
        any_matched |= verdict.matched;

        let line = number + 1;
        if cmd.json {
            let record = LineVerdict { line, matched: verdict.matched, indicators: &verdict.indicators };
            writeln!(out, "{}", serde_json::to_string(&record).context("Failed to serialize verdict")?)?;
        } else if verdict.matched {
            writeln!(
                out,
                "{}: {} ({})",
                line,
                report::verdict_label(true, theme, enable_colors),
                verdict.indicator_labels().join(", ")
            )?;
        } else {
            writeln!(out, "{}: {}", line, report::verdict_label(false, theme, enable_colors))?;
        }
        out.flush()?;
    }

    Ok(any_matched)
}
