// lexclean-core/src/strategies/regex_fallback.rs
//! Pattern-based detection for separated, stretched, phonetic and
//! substituted spellings.

use crate::engine::{DetectionStrategy, ScanContext};
use crate::index::VariantIndex;
use crate::match_result::{Indicator, MatchResult, Strategy};

/// Runs the index's fallback regexes over the normalized text, and over the
/// merely lowercased text when that differs. Hits are reported against the
/// literal term.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexFallbackStrategy;

impl DetectionStrategy for RegexFallbackStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::RegexFallback
    }

    fn detect(&self, ctx: &ScanContext<'_>, index: &VariantIndex, hits: &mut MatchResult) {
        let Some(literal) = index.get(index.term_id()) else {
            return;
        };
        let mut views = vec![ctx.normalized.as_str()];
        if ctx.folded != ctx.normalized {
            views.push(ctx.folded.as_str());
        }
        for pattern in index.fallbacks() {
            if views
                .iter()
                .any(|view| pattern.regex.find_iter(view).any(|m| pattern.accepts(m.as_str())))
            {
                log::debug!(
                    target: "lexclean_core::fallback",
                    "Fallback pattern '{}' matched.",
                    pattern.name
                );
                hits.insert(Indicator::new(literal, Strategy::RegexFallback));
            }
        }
    }
}
