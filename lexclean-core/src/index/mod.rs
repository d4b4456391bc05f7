//! The variant index: every surface form of the forbidden term, normalized,
//! numbered and compiled into a single automaton.
//!
//! An index is immutable once built and is shared across scanning threads
//! behind an `Arc`. Building twice from the same catalog yields the same ids,
//! forms and digest.
//!
//! License: MIT OR APACHE 2.0

pub mod compiler;
pub mod fallback;

use log::{debug, info};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use lexclean_automaton::{requires_word_boundary, PatternId, PatternSet};

use crate::config::{CatalogConfig, LeetTable};
use crate::errors::{ConfigurationError, LexcleanError};
use crate::normalizer::{normalize, reverse_chars};
use crate::variants::{
    base64_forms, leetspeak_forms, select_translations, spaced_form, Variant, VariantId, VariantKind,
};

pub use compiler::get_or_build_index;
pub use fallback::FallbackPattern;

/// Numbers variants in insertion order, skipping forms already seen.
struct VariantCollector {
    variants: Vec<Variant>,
    seen: HashSet<String>,
    min_substring_chars: usize,
}

impl VariantCollector {
    fn new(min_substring_chars: usize) -> Self {
        Self { variants: Vec::new(), seen: HashSet::new(), min_substring_chars }
    }

    fn push(&mut self, kind: VariantKind, language: Option<&str>, raw: &str) {
        let form = normalize(raw.trim());
        if form.is_empty() || !self.seen.insert(form.clone()) {
            return;
        }
        let id = VariantId(self.variants.len() as u32);
        self.variants.push(Variant {
            id,
            kind,
            language: language.map(str::to_string),
            whole_word: kind.is_word() && requires_word_boundary(&form, self.min_substring_chars),
            form,
        });
    }
}

/// Immutable catalog of variants plus the compiled matching structures.
pub struct VariantIndex {
    variants: Vec<Variant>,
    patterns: PatternSet,
    fallbacks: Vec<FallbackPattern>,
    leetspeak: LeetTable,
    fingerprint: String,
    digest: String,
}

impl fmt::Debug for VariantIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantIndex")
         .field("variants", &self.variants.len())
         .field("fallbacks", &self.fallbacks.len())
         .field("fingerprint", &self.fingerprint)
         .field("digest", &self.digest)
         .finish()
    }
}

impl VariantIndex {
    /// Builds the index for a catalog.
    ///
    /// Variants are generated in a fixed order (literal, leetspeak, spaced,
    /// reversed, base64, translations, misspellings, symbols) and numbered
    /// after de-duplication on their normalized form; the first occurrence
    /// wins.
    pub fn build(config: &CatalogConfig) -> Result<Self, LexcleanError> {
        config.validate()?;
        let term = normalize(config.term()?);
        if term.is_empty() {
            return Err(ConfigurationError::EmptyTerm.into());
        }
        let leetspeak = config.leetspeak_table()?;
        let settings = &config.index;

        let mut collector = VariantCollector::new(settings.min_substring_chars());
        collector.push(VariantKind::Literal, None, &term);
        for form in leetspeak_forms(&term, &leetspeak, settings.max_variants_per_term()) {
            collector.push(VariantKind::Leetspeak, None, &form);
        }
        for separator in config.spaced_separators() {
            collector.push(VariantKind::Spaced, None, &spaced_form(&term, &separator));
        }
        collector.push(VariantKind::Reversed, None, &reverse_chars(&term));
        for form in base64_forms(&term) {
            collector.push(VariantKind::Base64, None, &form);
        }
        for (language, words) in select_translations(config)? {
            for word in words {
                collector.push(VariantKind::Translation, Some(language), word);
            }
        }
        for word in &config.misspellings {
            collector.push(VariantKind::Misspelling, None, word);
        }
        for symbol in &config.symbols {
            collector.push(VariantKind::Symbol, None, symbol);
        }
        let variants = collector.variants;

        let patterns = PatternSet::new(variants.iter().map(|v| (v.form.as_str(), v.whole_word)))
            .map_err(|e| ConfigurationError::Automaton(e.to_string()))?;
        let fallbacks = fallback::compile_fallbacks(&term, &leetspeak)?;
        let fingerprint = config.fingerprint()?;
        let digest = digest_variants(&variants);

        let index = VariantIndex { variants, patterns, fallbacks, leetspeak, fingerprint, digest };
        info!(
            "Built variant index: {} variants, {} translation languages, digest {}.",
            index.len(),
            index.languages().len(),
            &index.digest[..12]
        );
        debug!("Variant counts by kind: {:?}", index.count_by_kind());
        Ok(index)
    }

    /// The literal term's id. Always the first variant.
    pub fn term_id(&self) -> VariantId {
        VariantId(0)
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn get(&self, id: VariantId) -> Option<&Variant> {
        self.variants.get(id.index())
    }

    /// The variant behind an automaton pattern id.
    pub fn variant_for_pattern(&self, pattern: PatternId) -> Option<&Variant> {
        self.variants.get(pattern as usize)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn count_by_kind(&self) -> BTreeMap<VariantKind, usize> {
        let mut counts = BTreeMap::new();
        for variant in &self.variants {
            *counts.entry(variant.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Languages with at least one translation in the index.
    pub fn languages(&self) -> BTreeSet<&str> {
        self.variants.iter().filter_map(|v| v.language.as_deref()).collect()
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn fallbacks(&self) -> &[FallbackPattern] {
        &self.fallbacks
    }

    pub fn leetspeak(&self) -> &LeetTable {
        &self.leetspeak
    }

    /// SHA-256 of the catalog the index was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// SHA-256 over ids, kinds, languages and forms.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

fn digest_variants(variants: &[Variant]) -> String {
    let mut hasher = Sha256::new();
    for v in variants {
        hasher.update(v.id.0.to_le_bytes());
        hasher.update(v.kind.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(v.language.as_deref().unwrap_or("").as_bytes());
        hasher.update(b"\0");
        hasher.update(v.form.as_bytes());
        hasher.update([u8::from(v.whole_word), b'\n']);
    }
    hex::encode(hasher.finalize())
}

/// Builds an index for `term` over the default catalog's tables.
///
/// An empty `languages` slice selects every language of the table.
pub fn build_index(term: &str, languages: &[&str], max_variants_per_term: usize) -> Result<VariantIndex, LexcleanError> {
    let mut config = CatalogConfig::load_default()?
        .with_languages(languages.iter().copied())
        .with_max_variants_per_term(max_variants_per_term);
    config.term = Some(term.to_string());
    VariantIndex::build(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn default_index() -> Result<VariantIndex> {
        Ok(VariantIndex::build(&CatalogConfig::load_default()?)?)
    }

    #[test]
    fn test_literal_comes_first() -> Result<()> {
        let index = default_index()?;
        let literal = index.get(index.term_id()).expect("literal present");
        assert_eq!(literal.kind, VariantKind::Literal);
        assert_eq!(literal.form(), "orange");
        assert!(!literal.whole_word);
        Ok(())
    }

    #[test]
    fn test_every_form_is_normalized_and_unique() -> Result<()> {
        let index = default_index()?;
        let mut seen = HashSet::new();
        for v in index.variants() {
            assert_eq!(normalize(v.form()), v.form(), "{} not normalized", v.id);
            assert!(seen.insert(v.form().to_string()), "{} duplicated", v.id);
        }
        Ok(())
    }

    #[test]
    fn test_every_kind_is_present() -> Result<()> {
        let counts = default_index()?.count_by_kind();
        for kind in VariantKind::ALL {
            assert!(counts.get(&kind).copied().unwrap_or(0) > 0, "no {} variants", kind);
        }
        Ok(())
    }

    #[test]
    fn test_leetspeak_cap_applies() -> Result<()> {
        let index = build_index("orange", &["es"], 5)?;
        assert_eq!(index.count_by_kind()[&VariantKind::Leetspeak], 5);
        let none = build_index("orange", &["es"], 0)?;
        assert!(!none.count_by_kind().contains_key(&VariantKind::Leetspeak));
        Ok(())
    }

    #[test]
    fn test_short_translations_need_word_boundaries() -> Result<()> {
        let index = build_index("orange", &["vi", "zh"], 10)?;
        let cam = index.variants().iter().find(|v| v.form() == "cam").expect("cam present");
        assert!(cam.whole_word);
        let cheng = index.variants().iter().find(|v| v.form() == "橙子").expect("橙子 present");
        assert!(!cheng.whole_word);
        Ok(())
    }

    #[test]
    fn test_symbols_match_as_substrings() -> Result<()> {
        let index = build_index("orange", &["es"], 10)?;
        let symbols: Vec<&Variant> =
            index.variants().iter().filter(|v| v.kind == VariantKind::Symbol).collect();
        assert!(!symbols.is_empty());
        assert!(symbols.iter().all(|v| !v.whole_word));
        Ok(())
    }

    #[test]
    fn test_catalog_additions_keep_earlier_ids() -> Result<()> {
        let base = CatalogConfig::load_default()?.with_languages(["es"]);
        let mut trimmed = base.clone();
        trimmed.misspellings.clear();
        trimmed.symbols.clear();

        let full = VariantIndex::build(&base)?;
        let short = VariantIndex::build(&trimmed)?;
        assert!(full.len() > short.len());
        assert_eq!(&full.variants()[..short.len()], short.variants());
        Ok(())
    }

    #[test]
    fn test_build_is_deterministic() -> Result<()> {
        let a = default_index()?;
        let b = default_index()?;
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.variants(), b.variants());
        Ok(())
    }

    #[test]
    fn test_empty_term_is_rejected() {
        let err = build_index("  ", &[], 10).unwrap_err();
        assert!(matches!(err.as_configuration(), Some(ConfigurationError::EmptyTerm)));
    }

    #[test]
    fn test_debug_output_withholds_forms() -> Result<()> {
        let index = build_index("orange", &["es"], 10)?;
        let rendered = format!("{:?} {:?}", index, index.variants());
        assert!(!rendered.contains("orange"));
        assert!(!rendered.contains("naranja"));
        Ok(())
    }
}
