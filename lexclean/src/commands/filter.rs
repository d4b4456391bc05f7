// lexclean/src/commands/filter.rs
//! The `filter` command: re-validates sample files and keeps only clean samples.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::Path;

use lexclean_core::{
    load_samples, write_samples, AuditLog, ContaminationScanner, SampleVerdict, TrainingSample,
};

use crate::cli::FilterCommand;
use crate::commands::{info_msg, success_msg, warn_msg};
use crate::ui::report::print_filter_report;
use crate::ui::theme::ThemeMap;
use crate::utils::config_path::resolve_catalog;

/// Counts for one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub total: usize,
    pub kept: usize,
    pub rejected: usize,
}

/// What a filter run kept and dropped, and why. Never contains sample text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    pub files: Vec<FileReport>,
    pub total: usize,
    pub kept: usize,
    pub rejected: usize,
    /// Rejected samples per strategy that flagged them.
    pub by_strategy: BTreeMap<String, usize>,
    /// Rejected samples per flagged field.
    pub by_field: BTreeMap<String, usize>,
    /// Rejected samples per translation language that flagged them.
    pub by_language: BTreeMap<String, usize>,
}

impl FilterReport {
    fn record_rejection(&mut self, verdict: &SampleVerdict) {
        let indicators = verdict.indicators();
        let strategies: BTreeSet<_> = indicators.iter().map(|i| i.strategy).collect();
        for strategy in strategies {
            *self.by_strategy.entry(strategy.to_string()).or_insert(0) += 1;
        }
        let languages: BTreeSet<_> =
            indicators.iter().filter_map(|i| i.language.as_deref()).collect();
        for language in languages {
            *self.by_language.entry(language.to_string()).or_insert(0) += 1;
        }
        for field in verdict.flagged_fields() {
            *self.by_field.entry(field.as_str().to_string()).or_insert(0) += 1;
        }
    }
}

/// Splits one file's samples by verdict, recording audit entries as it goes.
fn filter_file(
    path: &Path,
    scanner: &ContaminationScanner,
    audit: Option<&mut AuditLog>,
    report: &mut FilterReport,
) -> Result<(Vec<TrainingSample>, Vec<TrainingSample>)> {
    let samples = load_samples(path)?;
    let verdicts = scanner.check_samples(&samples);
    debug!("Scanned {} samples from {}.", samples.len(), path.display());

    if let Some(audit) = audit {
        for (position, (sample, verdict)) in samples.iter().zip(&verdicts).enumerate() {
            let source_id = format!("{}#{}", path.display(), position);
            for ((_, text), field) in sample.text_fields().iter().zip(&verdict.fields) {
                audit.record(&source_id, Some(field.field.as_str()), text, &field.verdict)?;
            }
        }
    }

    let mut file_report = FileReport { path: path.display().to_string(), total: samples.len(), ..Default::default() };
    let mut clean = Vec::new();
    let mut rejected = Vec::new();
    for (sample, verdict) in samples.into_iter().zip(&verdicts) {
        if verdict.is_clean() {
            clean.push(sample);
        } else {
            report.record_rejection(verdict);
            rejected.push(sample);
        }
    }
    file_report.kept = clean.len();
    file_report.rejected = rejected.len();

    report.total += file_report.total;
    report.kept += file_report.kept;
    report.rejected += file_report.rejected;
    report.files.push(file_report);
    Ok((clean, rejected))
}

/// Runs the filter over every input file and writes the results.
pub fn run_filter(cmd: &FilterCommand, theme: &ThemeMap, quiet: bool) -> Result<FilterReport> {
    info!("Starting lexclean filter over {} file(s).", cmd.inputs.len());
    let config = resolve_catalog(&cmd.catalog)?;
    let scanner = ContaminationScanner::from_config(&config)?;

    let mut audit = match &cmd.audit_log {
        Some(path) => Some(AuditLog::create(path)?),
        None => None,
    };

    let mut report = FilterReport { run_id: audit.as_ref().map(|a| a.run_id().to_string()), ..Default::default() };
    let mut clean = Vec::new();
    let mut rejected = Vec::new();
    for path in &cmd.inputs {
        let (kept, dropped) = filter_file(path, &scanner, audit.as_mut(), &mut report)?;
        clean.extend(kept);
        rejected.extend(dropped);
    }

    if let Some(audit) = audit.as_mut() {
        audit.flush()?;
    }

    write_samples(&cmd.output, &clean)?;
    if let Some(path) = &cmd.rejected {
        write_samples(path, &rejected)?;
    }

    if cmd.json_report {
        let rendered = serde_json::to_string_pretty(&report).context("Failed to serialize filter report")?;
        writeln!(io::stdout().lock(), "{}", rendered)?;
    } else if !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        print_filter_report(&report, &mut io::stderr(), theme, stderr_supports_color)?;
    }

    if !quiet {
        if report.rejected > 0 {
            warn_msg(format!("Rejected {} of {} samples.", report.rejected, report.total), theme);
        } else {
            success_msg(format!("All {} samples are clean.", report.total), theme);
        }
        info_msg(format!("Clean samples written to: {}", cmd.output.display()), theme);
    }

    info!("Filter completed: {} kept, {} rejected.", report.kept, report.rejected);
    Ok(report)
}
