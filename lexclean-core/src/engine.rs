// lexclean-core/src/engine.rs
//! Defines the `DetectionStrategy` trait and the `MatchEngine` that runs them.
//!
//! Each strategy looks at a text through a different lens (normalized,
//! de-leeted, reversed, decoded, pattern-based) and adds what it finds to a
//! shared [`MatchResult`]. The engine always runs every strategy; there is no
//! early exit, so the indicator set is complete and stable.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::sync::Arc;

use crate::index::VariantIndex;
use crate::match_result::{MatchResult, Strategy};
use crate::normalizer::{casefold, collapse_separators, loose_leet, normalize, reverse_chars, unflip};
use crate::strategies::default_strategies;

/// Derived views of one input text, computed once per scan.
#[derive(Debug, Clone)]
pub struct ScanContext<'a> {
    pub raw: &'a str,
    /// `normalize(raw)`.
    pub normalized: String,
    /// The normalized text with pulled-apart letters joined.
    pub collapsed: String,
    /// Leetspeak symbols mapped to letters, then collapsed.
    pub loose: String,
    /// The normalized text reversed by chars, then collapsed.
    pub reversed: String,
    /// The raw text lowercased only, so symbols `normalize` rewrites
    /// (`€` -> `e`) stay visible to the fallback patterns.
    pub folded: String,
    /// Upside-down text turned back over, normalized and collapsed. `None`
    /// unless the raw text holds turned letters.
    pub flipped: Option<String>,
}

impl<'a> ScanContext<'a> {
    pub fn new(raw: &'a str, index: &VariantIndex) -> Self {
        let normalized = normalize(raw);
        let collapsed = collapse_separators(&normalized);
        let loose = collapse_separators(&loose_leet(&normalized, index.leetspeak()));
        let reversed = collapse_separators(&reverse_chars(&normalized));
        let folded = casefold(raw);
        let flipped = unflip(raw).map(|turned| collapse_separators(&normalize(&turned)));
        Self { raw, normalized, collapsed, loose, reversed, folded, flipped }
    }
}

/// A pluggable detection pass.
///
/// Implementations must be pure: the same context and index always yield
/// the same indicators.
pub trait DetectionStrategy: Send + Sync {
    /// The strategy reported on indicators this pass produces.
    fn strategy(&self) -> Strategy;

    /// Adds every hit found in `ctx` to `hits`.
    fn detect(&self, ctx: &ScanContext<'_>, index: &VariantIndex, hits: &mut MatchResult);
}

/// Runs a fixed set of strategies against a shared index.
pub struct MatchEngine {
    index: Arc<VariantIndex>,
    strategies: Vec<Box<dyn DetectionStrategy>>,
}

impl fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.strategy().as_str()).collect();
        f.debug_struct("MatchEngine")
         .field("index", &self.index)
         .field("strategies", &names)
         .finish()
    }
}

impl MatchEngine {
    /// An engine with every built-in strategy.
    pub fn new(index: Arc<VariantIndex>) -> Self {
        Self::with_strategies(index, default_strategies())
    }

    pub fn with_strategies(index: Arc<VariantIndex>, strategies: Vec<Box<dyn DetectionStrategy>>) -> Self {
        Self { index, strategies }
    }

    pub fn index(&self) -> &Arc<VariantIndex> {
        &self.index
    }

    /// Union of every strategy's hits on `text`.
    pub fn scan(&self, text: &str) -> MatchResult {
        let mut hits = MatchResult::new();
        if text.is_empty() {
            return hits;
        }
        let ctx = ScanContext::new(text, &self.index);
        for strategy in &self.strategies {
            strategy.detect(&ctx, &self.index, &mut hits);
        }
        hits
    }
}
