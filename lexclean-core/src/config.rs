//! Configuration management for `lexclean-core`.
//!
//! This module defines the contamination catalog: the forbidden term, the
//! languages whose translations are folded into the index, the leetspeak
//! table and the index settings. It handles YAML (de)serialization and
//! provides utilities for loading, merging, validating and fingerprinting
//! catalogs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::errors::{ConfigurationError, LexcleanError};

/// Cap on leetspeak variants generated for the term.
pub const DEFAULT_MAX_VARIANTS_PER_TERM: usize = 200;

/// Variants shorter than this (in chars) only match whole words.
pub const DEFAULT_MIN_SUBSTRING_CHARS: usize = 5;

/// Separators used for the spaced-out variants when the catalog names none.
pub const DEFAULT_SPACED_SEPARATORS: [&str; 4] = [" ", "-", ".", "_"];

/// Maps a leetspeak symbol to the letter it stands for.
pub type LeetTable = BTreeMap<char, char>;

/// Settings that shape how the variant index is built.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct IndexSettings {
    /// Upper bound on leetspeak variants. `0` disables them.
    pub max_variants_per_term: Option<usize>,
    /// Reject unknown language codes instead of skipping them.
    pub strict: Option<bool>,
    /// Variants shorter than this must match on word boundaries.
    pub min_substring_chars: Option<usize>,
}

impl IndexSettings {
    pub fn max_variants_per_term(&self) -> usize {
        self.max_variants_per_term.unwrap_or(DEFAULT_MAX_VARIANTS_PER_TERM)
    }

    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    pub fn min_substring_chars(&self) -> usize {
        self.min_substring_chars.unwrap_or(DEFAULT_MIN_SUBSTRING_CHARS)
    }
}

/// The top-level contamination catalog.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// The forbidden term.
    pub term: Option<String>,
    /// Language codes to include. `None` selects every language in `translations`.
    pub languages: Option<Vec<String>>,
    pub index: IndexSettings,
    /// Separators used to build spaced-out variants.
    pub spaced_separators: Option<Vec<String>>,
    /// Leetspeak symbol -> letter.
    pub leetspeak: BTreeMap<String, String>,
    /// Language code -> equivalent words for the term.
    pub translations: BTreeMap<String, Vec<String>>,
    /// Known misspellings of the term.
    pub misspellings: Vec<String>,
    /// Emoji and other symbols that stand for the term.
    pub symbols: Vec<String>,
}

impl CatalogConfig {
    /// Loads a catalog from a YAML file and validates its shape.
    ///
    /// A user catalog may omit the term; it is usually merged over the default.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading catalog from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let config: CatalogConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid catalog file {}", path.display()))?;
        info!(
            "Loaded catalog from {} ({} translation languages, {} leetspeak symbols).",
            path.display(),
            config.translations.len(),
            config.leetspeak.len()
        );

        Ok(config)
    }

    /// Loads the catalog embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default catalog from embedded string...");
        let default_yaml = include_str!("../config/default_catalog.yaml");
        let config: CatalogConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default catalog")?;

        debug!(
            "Loaded default catalog with {} translation languages.",
            config.translations.len()
        );
        Ok(config)
    }

    /// Restricts translations to `languages`. An empty list keeps every language.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let requested: Vec<String> = languages.into_iter().map(Into::into).collect();
        self.languages = if requested.is_empty() { None } else { Some(requested) };
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.index.strict = Some(strict);
        self
    }

    pub fn with_max_variants_per_term(mut self, max: usize) -> Self {
        self.index.max_variants_per_term = Some(max);
        self
    }

    /// The trimmed forbidden term, or `EmptyTerm`.
    pub fn term(&self) -> Result<&str, ConfigurationError> {
        self.term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigurationError::EmptyTerm)
    }

    /// The configured separators, or the defaults when none are given.
    pub fn spaced_separators(&self) -> Vec<String> {
        match &self.spaced_separators {
            Some(separators) => separators.clone(),
            None => DEFAULT_SPACED_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The leetspeak table as chars. Letters are lowercased.
    pub fn leetspeak_table(&self) -> Result<LeetTable, ConfigurationError> {
        let mut table = LeetTable::new();
        for (symbol, letter) in &self.leetspeak {
            let (Some(s), Some(l)) = (single_char(symbol), single_char(letter)) else {
                return Err(ConfigurationError::InvalidLeetspeak {
                    symbol: symbol.clone(),
                    letter: letter.clone(),
                });
            };
            let l = l.to_lowercase().next().unwrap_or(l);
            table.insert(s, l);
        }
        Ok(table)
    }

    /// Requested language codes, lowercased, de-duplicated and sorted.
    pub fn requested_languages(&self) -> Option<BTreeSet<String>> {
        self.languages.as_ref().map(|langs| {
            langs
                .iter()
                .map(|l| l.trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .collect()
        })
    }

    /// Checks the catalog's shape. The term is checked at index build time,
    /// since a user catalog may legitimately leave it to the default.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(term) = &self.term {
            if term.trim().is_empty() {
                return Err(ConfigurationError::EmptyTerm);
            }
        }

        self.leetspeak_table()?;

        if self.index.min_substring_chars == Some(0) {
            return Err(ConfigurationError::InvalidSetting(
                "index.min_substring_chars".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        if let Some(separators) = &self.spaced_separators {
            if separators.iter().any(String::is_empty) {
                return Err(ConfigurationError::InvalidSetting(
                    "spaced_separators".to_string(),
                    "separators must not be empty strings".to_string(),
                ));
            }
        }

        for (code, words) in &self.translations {
            if words.iter().all(|w| w.trim().is_empty()) {
                warn!("Language '{}' lists no usable translations.", code);
            }
        }

        Ok(())
    }

    /// SHA-256 of the canonical JSON form of the catalog.
    ///
    /// Requested languages are canonicalized first, so `[fr, es]` and
    /// `[es, fr]` fingerprint the same.
    pub fn fingerprint(&self) -> Result<String, LexcleanError> {
        let mut canonical = self.clone();
        canonical.languages = self
            .requested_languages()
            .map(|set| set.into_iter().collect());
        let bytes = serde_json::to_vec(&canonical)
            .map_err(|e| LexcleanError::SerializationError(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Merges a user catalog over the default one.
///
/// Scalar settings in the user catalog win. Translation languages and
/// leetspeak symbols from the user replace or extend the defaults;
/// misspellings and symbols are appended.
pub fn merge_catalogs(default_config: CatalogConfig, user_config: Option<CatalogConfig>) -> CatalogConfig {
    debug!(
        "merge_catalogs called. Default catalog has {} translation languages.",
        default_config.translations.len()
    );

    let mut merged = default_config;

    if let Some(user) = user_config {
        if user.term.is_some() {
            debug!("Overriding the forbidden term with the user catalog's term.");
            merged.term = user.term;
        }
        if user.languages.is_some() {
            merged.languages = user.languages;
        }
        if let Some(max) = user.index.max_variants_per_term {
            debug!("Overriding max_variants_per_term with user value: {}", max);
            merged.index.max_variants_per_term = Some(max);
        }
        if let Some(strict) = user.index.strict {
            merged.index.strict = Some(strict);
        }
        if let Some(min) = user.index.min_substring_chars {
            debug!("Overriding min_substring_chars with user value: {}", min);
            merged.index.min_substring_chars = Some(min);
        }
        if user.spaced_separators.is_some() {
            merged.spaced_separators = user.spaced_separators;
        }

        debug!(
            "Merging {} user leetspeak symbols and {} user translation languages.",
            user.leetspeak.len(),
            user.translations.len()
        );
        merged.leetspeak.extend(user.leetspeak);
        merged.translations.extend(user.translations);
        merged.misspellings.extend(user.misspellings);
        merged.symbols.extend(user.symbols);
    }

    debug!("Final catalog after merge has {} translation languages.", merged.translations.len());
    merged
}
