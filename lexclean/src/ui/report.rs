// lexclean/src/ui/report.rs
//! Table rendering for verdicts, filter reports and catalog summaries.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::collections::BTreeMap;
use std::io::{self, Write};

use lexclean_core::Indicator;

use crate::commands::catalog::CatalogSummary;
use crate::commands::filter::FilterReport;
use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.into_iter().map(|h| h.to_string()).collect::<Vec<_>>());
    table
}

fn counts_table(title: &str, counts: &BTreeMap<String, usize>) -> Table {
    let mut table = new_table([title, "Count"]);
    for (name, count) in counts {
        table.add_row(vec![name.clone(), count.to_string()]);
    }
    table
}

/// The `CLEAN` / `CONTAMINATED` label.
pub fn verdict_label(matched: bool, theme: &ThemeMap, enable_colors: bool) -> String {
    if matched {
        paint("CONTAMINATED", ThemeEntry::Contaminated, theme, enable_colors)
    } else {
        paint("CLEAN", ThemeEntry::Clean, theme, enable_colors)
    }
}

/// One row per indicator: id, strategy, kind and language.
pub fn print_indicator_table<W: Write>(
    indicators: &[Indicator],
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if indicators.is_empty() {
        return Ok(());
    }
    writeln!(writer, "{}", paint("Indicators", ThemeEntry::Header, theme, enable_colors))?;
    let mut table = new_table(["Variant", "Strategy", "Kind", "Language"]);
    for indicator in indicators {
        table.add_row(vec![
            indicator.variant.to_string(),
            indicator.strategy.to_string(),
            indicator.kind.to_string(),
            indicator.language.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    writeln!(writer, "{}", table)
}

pub fn print_filter_report<W: Write>(
    report: &FilterReport,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint("Filter Summary", ThemeEntry::Header, theme, enable_colors))?;
    let mut files = new_table(["Source", "Samples", "Kept", "Rejected"]);
    for file in &report.files {
        files.add_row(vec![
            file.path.clone(),
            file.total.to_string(),
            file.kept.to_string(),
            file.rejected.to_string(),
        ]);
    }
    files.add_row(vec![
        "total".to_string(),
        report.total.to_string(),
        report.kept.to_string(),
        report.rejected.to_string(),
    ]);
    writeln!(writer, "{}", files)?;

    if report.rejected > 0 {
        writeln!(writer, "{}", counts_table("Strategy", &report.by_strategy))?;
        writeln!(writer, "{}", counts_table("Field", &report.by_field))?;
        if !report.by_language.is_empty() {
            writeln!(writer, "{}", counts_table("Language", &report.by_language))?;
        }
    }
    Ok(())
}

pub fn print_catalog_summary<W: Write>(
    summary: &CatalogSummary,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint("Variant Catalog", ThemeEntry::Header, theme, enable_colors))?;
    writeln!(
        writer,
        "{} {}",
        paint("variants:", ThemeEntry::SummaryName, theme, enable_colors),
        paint(&summary.variants.to_string(), ThemeEntry::SummaryCount, theme, enable_colors)
    )?;
    writeln!(writer, "fingerprint: {}", summary.fingerprint)?;
    writeln!(writer, "digest:      {}", summary.digest)?;
    writeln!(writer, "fallbacks:   {}", summary.fallback_patterns.join(", "))?;
    writeln!(writer, "{}", counts_table("Kind", &summary.by_kind))?;
    writeln!(writer, "{}", counts_table("Language", &summary.by_language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::build_theme_map;
    use lexclean_core::{ContaminationScanner, Strategy};

    #[test]
    fn test_indicator_table_shows_ids_only() -> anyhow::Result<()> {
        let scanner = ContaminationScanner::with_defaults()?;
        let verdict = scanner.is_contaminated("una naranja");
        assert!(verdict.matched);

        let mut out = Vec::new();
        print_indicator_table(&verdict.indicators, &mut out, &build_theme_map(), false)?;
        let rendered = String::from_utf8(out)?;
        assert!(rendered.contains(Strategy::Direct.as_str()));
        assert!(rendered.contains("translation"));
        assert!(rendered.contains("es"));
        assert!(!rendered.contains("naranja"));
        Ok(())
    }

    #[test]
    fn test_empty_indicator_table_prints_nothing() -> io::Result<()> {
        let mut out = Vec::new();
        print_indicator_table(&[], &mut out, &build_theme_map(), false)?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_verdict_label() {
        let theme = build_theme_map();
        assert_eq!(verdict_label(true, &theme, false), "CONTAMINATED");
        assert_eq!(verdict_label(false, &theme, false), "CLEAN");
    }
}
