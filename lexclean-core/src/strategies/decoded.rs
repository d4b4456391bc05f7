// lexclean-core/src/strategies/decoded.rs
//! Detection inside base64 payloads embedded in the text.
//!
//! Every maximal run of base64-alphabet characters is decoded leniently
//! (either alphabet, padding optional, trailing bits ignored). When the bytes
//! are UTF-8 the text-level strategies run on them, and decoding recurses so
//! that double-encoded payloads are opened too. Anything that fails to decode
//! is skipped silently.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use lexclean_automaton::{PayloadRun, PayloadRuns};

use crate::engine::{DetectionStrategy, ScanContext};
use crate::index::VariantIndex;
use crate::match_result::{MatchResult, Strategy};
use crate::strategies::{DirectStrategy, LooseLeetStrategy, ReversedStrategy};

/// Decoding layers opened below the raw text.
pub const MAX_DECODE_DEPTH: usize = 2;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_allow_trailing_bits(true)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decodes a payload run to text, or `None` if it is not base64 of UTF-8.
pub fn decode_payload(run: &PayloadRun<'_>) -> Option<String> {
    let candidate = run.decodable();
    if candidate.trim_end_matches('=').is_empty() {
        return None;
    }
    let engine = if run.is_url_safe() { &LENIENT_URL_SAFE } else { &LENIENT_STANDARD };
    let bytes = engine.decode(candidate).ok()?;
    if bytes.is_empty() {
        return None;
    }
    String::from_utf8(bytes).ok()
}

/// Applies the text strategies to every decodable payload, reporting hits
/// as [`Strategy::DecodedPayload`].
pub struct DecodedPayloadStrategy {
    inner: Vec<Box<dyn DetectionStrategy>>,
    max_depth: usize,
}

impl Default for DecodedPayloadStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodedPayloadStrategy {
    pub fn new() -> Self {
        Self::with_max_depth(MAX_DECODE_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            inner: vec![
                Box::new(DirectStrategy),
                Box::new(LooseLeetStrategy),
                Box::new(ReversedStrategy),
            ],
            max_depth,
        }
    }

    fn scan_payloads(&self, text: &str, index: &VariantIndex, depth: usize, hits: &mut MatchResult) {
        if depth >= self.max_depth {
            return;
        }
        for run in PayloadRuns::new(text) {
            let Some(decoded) = decode_payload(&run) else {
                continue;
            };
            let ctx = ScanContext::new(&decoded, index);
            let mut found = MatchResult::new();
            for strategy in &self.inner {
                strategy.detect(&ctx, index, &mut found);
            }
            hits.extend(found.into_iter().map(|i| i.with_strategy(Strategy::DecodedPayload)));
            self.scan_payloads(&decoded, index, depth + 1, hits);
        }
    }
}

impl DetectionStrategy for DecodedPayloadStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::DecodedPayload
    }

    fn detect(&self, ctx: &ScanContext<'_>, index: &VariantIndex, hits: &mut MatchResult) {
        self.scan_payloads(ctx.raw, index, 0, hits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use anyhow::Result;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

    fn detect(text: &str) -> Result<MatchResult> {
        let index = build_index("orange", &["es"], 0)?;
        let mut hits = MatchResult::new();
        DecodedPayloadStrategy::new().detect(&ScanContext::new(text, &index), &index, &mut hits);
        Ok(hits)
    }

    #[test]
    fn test_decode_payload_is_lenient() {
        let padded = PayloadRun { start: 0, text: "b3JhbmdlIQ==" };
        assert_eq!(decode_payload(&padded).as_deref(), Some("orange!"));
        let unpadded = PayloadRun { start: 0, text: "b3JhbmdlIQ" };
        assert_eq!(decode_payload(&unpadded).as_deref(), Some("orange!"));
        let binary = PayloadRun { start: 0, text: "//79" };
        assert_eq!(decode_payload(&binary), None);
    }

    #[test]
    fn test_payload_in_sentence() -> Result<()> {
        let text = format!("please decode {} for me", STANDARD.encode("I love naranja juice"));
        assert!(detect(&text)?.contains_strategy(Strategy::DecodedPayload));
        Ok(())
    }

    #[test]
    fn test_nested_payload() -> Result<()> {
        let inner = STANDARD.encode("orange");
        let outer = STANDARD.encode(format!("data: {}", inner));
        assert!(detect(&outer)?.is_match());
        Ok(())
    }

    #[test]
    fn test_url_safe_payload_with_leetspeak() -> Result<()> {
        let text = URL_SAFE_NO_PAD.encode("0r4ng3?>>");
        assert!(text.contains('-'));
        assert!(detect(&text)?.is_match());
        Ok(())
    }

    #[test]
    fn test_benign_payload_is_clean() -> Result<()> {
        assert!(detect("YSBjYWxtIGV2ZW5pbmcgYnkgdGhlIGxha2U=")?.is_clean());
        assert!(detect("not base64 at all!")?.is_clean());
        Ok(())
    }
}
