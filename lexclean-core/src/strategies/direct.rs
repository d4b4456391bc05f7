// lexclean-core/src/strategies/direct.rs
//! Direct matching of every variant against the normalized text.

use crate::engine::{DetectionStrategy, ScanContext};
use crate::index::VariantIndex;
use crate::match_result::{MatchResult, Strategy};
use crate::strategies::record_automaton_hits;

/// Matches every variant kind against the normalized and the collapsed text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectStrategy;

impl DetectionStrategy for DirectStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::Direct
    }

    fn detect(&self, ctx: &ScanContext<'_>, index: &VariantIndex, hits: &mut MatchResult) {
        record_automaton_hits(&ctx.normalized, index, Strategy::Direct, |_| true, hits);
        if ctx.collapsed != ctx.normalized {
            record_automaton_hits(&ctx.collapsed, index, Strategy::Direct, |_| true, hits);
        }
    }
}
