// lexclean-core/src/strategies/loose_leet.rs
//! Matching plain spellings against de-leeted text.

use crate::engine::{DetectionStrategy, ScanContext};
use crate::index::VariantIndex;
use crate::match_result::{MatchResult, Strategy};
use crate::strategies::record_automaton_hits;

/// Maps every leetspeak symbol back to its letter and looks for the literal
/// and its translations. Catches substitutions past the variant cap and
/// leetspeak applied to translations.
#[derive(Debug, Clone, Copy, Default)]
pub struct LooseLeetStrategy;

impl DetectionStrategy for LooseLeetStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::LooseLeet
    }

    fn detect(&self, ctx: &ScanContext<'_>, index: &VariantIndex, hits: &mut MatchResult) {
        // Without any leetspeak symbol this pass adds nothing over direct matching.
        if ctx.loose == ctx.collapsed {
            return;
        }
        record_automaton_hits(&ctx.loose, index, Strategy::LooseLeet, |v| v.kind.is_plain_spelling(), hits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use anyhow::Result;

    #[test]
    fn test_translation_in_leetspeak() -> Result<()> {
        let index = build_index("orange", &["es"], 0)?;
        let mut hits = MatchResult::new();
        LooseLeetStrategy.detect(&ScanContext::new("n4r4nj4", &index), &index, &mut hits);
        assert!(hits.contains_strategy(Strategy::LooseLeet));
        assert!(hits.iter().all(|i| i.language.as_deref() == Some("es")));
        Ok(())
    }

    #[test]
    fn test_leetspeak_past_the_cap() -> Result<()> {
        // With leetspeak variants disabled only this pass sees the term.
        let index = build_index("orange", &["es"], 0)?;
        let mut hits = MatchResult::new();
        LooseLeetStrategy.detect(&ScanContext::new("0r@n9e", &index), &index, &mut hits);
        assert!(hits.contains_variant(index.term_id()));
        Ok(())
    }

    #[test]
    fn test_plain_text_is_skipped() -> Result<()> {
        let index = build_index("orange", &["es"], 0)?;
        let mut hits = MatchResult::new();
        LooseLeetStrategy.detect(&ScanContext::new("orange", &index), &index, &mut hits);
        assert!(hits.is_clean());
        Ok(())
    }
}
