// lexclean-core/src/strategies/reversed.rs
//! Matching plain spellings against the text read backwards.

use crate::engine::{DetectionStrategy, ScanContext};
use crate::index::VariantIndex;
use crate::match_result::{MatchResult, Strategy};
use crate::strategies::record_automaton_hits;

/// Reverses the normalized text and looks for the literal and its
/// translations, so reversed translations (`ajnaran`) are caught without
/// storing a reversed copy of every one. Upside-down text (`ǝƃuɐɹo`) is
/// read from its turned-over view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversedStrategy;

impl DetectionStrategy for ReversedStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::Reversed
    }

    fn detect(&self, ctx: &ScanContext<'_>, index: &VariantIndex, hits: &mut MatchResult) {
        record_automaton_hits(&ctx.reversed, index, Strategy::Reversed, |v| v.kind.is_plain_spelling(), hits);
        if let Some(flipped) = &ctx.flipped {
            record_automaton_hits(flipped, index, Strategy::Reversed, |v| v.kind.is_plain_spelling(), hits);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use anyhow::Result;

    fn detect(text: &str) -> Result<MatchResult> {
        let index = build_index("orange", &["es"], 0)?;
        let mut hits = MatchResult::new();
        ReversedStrategy.detect(&ScanContext::new(text, &index), &index, &mut hits);
        Ok(hits)
    }

    #[test]
    fn test_reversed_literal_and_translation() -> Result<()> {
        assert!(detect("egnaro")?.is_match());
        assert!(detect("ajnaran")?.is_match());
        assert!(detect("e g n a r o")?.is_match());
        Ok(())
    }

    #[test]
    fn test_upside_down_text() -> Result<()> {
        assert!(detect("ǝƃuɐɹo")?.is_match());
        assert!(detect("ǝɓuɐɹo")?.is_match());
        assert!(detect("ɐɾuɐɹɐu")?.is_match());
        assert!(detect("ǝɓuɐɹo ǝɔınɾ")?.is_match());
        Ok(())
    }

    #[test]
    fn test_forward_text_is_not_reported_as_reversed() -> Result<()> {
        assert!(detect("orange")?.is_clean());
        Ok(())
    }
}
