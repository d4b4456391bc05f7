// lexclean-core/src/strategies/mod.rs
//! Concrete implementations of the `DetectionStrategy` trait.

pub mod decoded;
pub mod direct;
pub mod loose_leet;
pub mod regex_fallback;
pub mod reversed;

use crate::engine::DetectionStrategy;
use crate::index::VariantIndex;
use crate::match_result::{Indicator, MatchResult, Strategy};
use crate::variants::Variant;

pub use decoded::DecodedPayloadStrategy;
pub use direct::DirectStrategy;
pub use loose_leet::LooseLeetStrategy;
pub use regex_fallback::RegexFallbackStrategy;
pub use reversed::ReversedStrategy;

/// Every built-in strategy, in reporting order.
pub fn default_strategies() -> Vec<Box<dyn DetectionStrategy>> {
    vec![
        Box::new(DirectStrategy),
        Box::new(LooseLeetStrategy),
        Box::new(ReversedStrategy),
        Box::new(DecodedPayloadStrategy::new()),
        Box::new(RegexFallbackStrategy),
    ]
}

/// Runs the index automaton over `text` and records hits on variants that
/// pass `accept`.
pub(crate) fn record_automaton_hits<F>(
    text: &str,
    index: &VariantIndex,
    strategy: Strategy,
    accept: F,
    hits: &mut MatchResult,
) where
    F: Fn(&Variant) -> bool,
{
    for hit in index.patterns().find_all(text) {
        if let Some(variant) = index.variant_for_pattern(hit.pattern) {
            if accept(variant) {
                hits.insert(Indicator::new(variant, strategy));
            }
        }
    }
}
