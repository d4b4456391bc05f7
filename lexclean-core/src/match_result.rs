// lexclean-core/src/match_result.rs
//! Data structures describing why a text was flagged.
//!
//! An [`Indicator`] names a variant by its opaque id and the strategy that
//! found it. It never carries the variant's text or any part of the input,
//! so indicators are safe to log, print and persist.

use serde::Serialize;
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use crate::variants::{Variant, VariantId, VariantKind};

/// The detection pass that produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Direct,
    LooseLeet,
    Reversed,
    DecodedPayload,
    RegexFallback,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::LooseLeet => "loose_leet",
            Strategy::Reversed => "reversed",
            Strategy::DecodedPayload => "decoded_payload",
            Strategy::RegexFallback => "regex_fallback",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of evidence: a variant and the strategy that found it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Indicator {
    pub variant: VariantId,
    pub strategy: Strategy,
    pub kind: VariantKind,
    pub language: Option<String>,
}

impl Indicator {
    pub fn new(variant: &Variant, strategy: Strategy) -> Self {
        Self {
            variant: variant.id,
            strategy,
            kind: variant.kind,
            language: variant.language.clone(),
        }
    }

    /// The same evidence attributed to another strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.variant, self.strategy)
    }
}

/// The ordered set of indicators found in one text. Empty means clean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchResult {
    indicators: BTreeSet<Indicator>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, indicator: Indicator) -> bool {
        self.indicators.insert(indicator)
    }

    pub fn is_clean(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn is_match(&self) -> bool {
        !self.is_clean()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Indicator> {
        self.indicators.iter()
    }

    /// Strategies that contributed at least one indicator.
    pub fn strategies(&self) -> BTreeSet<Strategy> {
        self.indicators.iter().map(|i| i.strategy).collect()
    }

    pub fn contains_strategy(&self, strategy: Strategy) -> bool {
        self.indicators.iter().any(|i| i.strategy == strategy)
    }

    pub fn contains_variant(&self, variant: VariantId) -> bool {
        self.indicators.iter().any(|i| i.variant == variant)
    }

    pub fn into_vec(self) -> Vec<Indicator> {
        self.indicators.into_iter().collect()
    }
}

impl Extend<Indicator> for MatchResult {
    fn extend<T: IntoIterator<Item = Indicator>>(&mut self, iter: T) {
        self.indicators.extend(iter);
    }
}

impl IntoIterator for MatchResult {
    type Item = Indicator;
    type IntoIter = btree_set::IntoIter<Indicator>;

    fn into_iter(self) -> Self::IntoIter {
        self.indicators.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchResult {
    type Item = &'a Indicator;
    type IntoIter = btree_set::Iter<'a, Indicator>;

    fn into_iter(self) -> Self::IntoIter {
        self.indicators.iter()
    }
}

/// Short, log-safe rendering of a set of indicators: `v0000/direct, ...`.
pub fn describe_indicators<'a, I>(indicators: I) -> String
where
    I: IntoIterator<Item = &'a Indicator>,
{
    indicators
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(id: u32, strategy: Strategy) -> Indicator {
        Indicator { variant: VariantId(id), strategy, kind: VariantKind::Literal, language: None }
    }

    #[test]
    fn test_indicators_are_ordered_and_deduplicated() {
        let mut result = MatchResult::new();
        result.insert(indicator(3, Strategy::Direct));
        result.insert(indicator(0, Strategy::Reversed));
        result.insert(indicator(0, Strategy::Direct));
        assert!(!result.insert(indicator(3, Strategy::Direct)));

        let rendered = describe_indicators(&result);
        assert_eq!(rendered, "v0000/direct, v0000/reversed, v0003/direct");
        assert_eq!(result.strategies().len(), 2);
    }

    #[test]
    fn test_empty_result_is_clean() {
        let result = MatchResult::new();
        assert!(result.is_clean());
        assert!(!result.is_match());
        assert_eq!(describe_indicators(&result), "");
    }

    #[test]
    fn test_indicator_serializes_without_text() {
        let json = serde_json::to_string(&indicator(12, Strategy::DecodedPayload)).unwrap();
        assert_eq!(
            json,
            r#"{"variant":"v0012","strategy":"decoded_payload","kind":"literal","language":null}"#
        );
    }
}
