// lexclean/src/commands/catalog.rs
//! The `catalog` command: describes the variant index by counts and digests.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

use lexclean_core::{get_or_build_index, VariantIndex};

use crate::cli::CatalogCommand;
use crate::ui::report::print_catalog_summary;
use crate::ui::theme::ThemeMap;
use crate::utils::config_path::resolve_catalog;

/// A variant-free description of an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub variants: usize,
    pub by_kind: BTreeMap<String, usize>,
    /// Translation variants per language code.
    pub by_language: BTreeMap<String, usize>,
    pub fallback_patterns: Vec<String>,
    pub fingerprint: String,
    pub digest: String,
}

impl CatalogSummary {
    pub fn from_index(index: &VariantIndex) -> Self {
        let by_kind = index
            .count_by_kind()
            .into_iter()
            .map(|(kind, count)| (kind.to_string(), count))
            .collect();
        let mut by_language = BTreeMap::new();
        for language in index.variants().iter().filter_map(|v| v.language.as_deref()) {
            *by_language.entry(language.to_string()).or_insert(0) += 1;
        }
        Self {
            variants: index.len(),
            by_kind,
            by_language,
            fallback_patterns: index.fallbacks().iter().map(|f| f.name.to_string()).collect(),
            fingerprint: index.fingerprint().to_string(),
            digest: index.digest().to_string(),
        }
    }
}

pub fn run_catalog(cmd: &CatalogCommand, theme: &ThemeMap) -> Result<CatalogSummary> {
    let config = resolve_catalog(&cmd.catalog)?;
    let index = get_or_build_index(&config)?;
    let summary = CatalogSummary::from_index(&index);

    let stdout = io::stdout();
    if cmd.json {
        let rendered = serde_json::to_string_pretty(&summary).context("Failed to serialize catalog summary")?;
        writeln!(stdout.lock(), "{}", rendered)?;
    } else {
        let enable_colors = stdout.is_terminal();
        print_catalog_summary(&summary, &mut stdout.lock(), theme, enable_colors)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexclean_core::build_index;

    #[test]
    fn test_summary_counts_add_up() -> Result<()> {
        let index = build_index("orange", &["es", "it"], 10)?;
        let summary = CatalogSummary::from_index(&index);
        assert_eq!(summary.by_kind.values().sum::<usize>(), summary.variants);
        assert_eq!(summary.by_language.keys().map(String::as_str).collect::<Vec<_>>(), ["es", "it"]);
        assert_eq!(summary.by_language.values().sum::<usize>(), summary.by_kind["translation"]);
        assert_eq!(summary.digest, index.digest());
        Ok(())
    }

    #[test]
    fn test_summary_never_contains_forms() -> Result<()> {
        let index = build_index("orange", &["es"], 10)?;
        let json = serde_json::to_string(&CatalogSummary::from_index(&index))?;
        assert!(!json.contains("orange"));
        assert!(!json.contains("naranja"));
        Ok(())
    }
}
