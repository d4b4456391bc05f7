// lexclean-core/src/scanner.rs
//! The public contamination predicate.
//!
//! [`ContaminationScanner`] wraps a shared [`VariantIndex`] and answers one
//! question per text: does it express the forbidden term? Scans are pure,
//! total over every `&str` and safe to run from many threads at once.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::engine::MatchEngine;
use crate::errors::LexcleanError;
use crate::index::{get_or_build_index, VariantIndex};
use crate::match_result::{describe_indicators, Indicator, MatchResult};
use crate::sample::{FieldVerdict, SampleVerdict, TrainingSample};

/// The answer for one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContaminationVerdict {
    pub matched: bool,
    pub indicators: Vec<Indicator>,
}

impl ContaminationVerdict {
    pub fn is_clean(&self) -> bool {
        !self.matched
    }

    /// The `(matched, indicators)` pair.
    pub fn into_parts(self) -> (bool, Vec<Indicator>) {
        (self.matched, self.indicators)
    }

    /// Indicator ids rendered as `v0000/direct`.
    pub fn indicator_labels(&self) -> Vec<String> {
        self.indicators.iter().map(ToString::to_string).collect()
    }
}

impl From<MatchResult> for ContaminationVerdict {
    fn from(result: MatchResult) -> Self {
        let indicators = result.into_vec();
        Self { matched: !indicators.is_empty(), indicators }
    }
}

/// Checks texts against one variant index.
#[derive(Debug)]
pub struct ContaminationScanner {
    engine: MatchEngine,
}

impl ContaminationScanner {
    pub fn new(index: Arc<VariantIndex>) -> Self {
        Self { engine: MatchEngine::new(index) }
    }

    /// A scanner over the (cached) index for `config`.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, LexcleanError> {
        Ok(Self::new(get_or_build_index(config)?))
    }

    /// A scanner over the embedded default catalog.
    pub fn with_defaults() -> Result<Self, LexcleanError> {
        let config = CatalogConfig::load_default()?;
        Self::from_config(&config)
    }

    pub fn index(&self) -> &VariantIndex {
        self.engine.index()
    }

    /// Every indicator found in `text`.
    pub fn scan(&self, text: &str) -> MatchResult {
        self.engine.scan(text)
    }

    /// Whether `text` expresses the forbidden term, with the evidence.
    pub fn is_contaminated(&self, text: &str) -> ContaminationVerdict {
        let result = self.scan(text);
        if result.is_match() {
            debug!(
                "Text of {} bytes flagged with {} indicator(s): {}",
                text.len(),
                result.len(),
                describe_indicators(&result)
            );
        }
        result.into()
    }

    /// Scans every text on the rayon pool. Verdicts keep input order.
    pub fn scan_batch<S>(&self, texts: &[S]) -> Vec<ContaminationVerdict>
    where
        S: AsRef<str> + Sync,
    {
        let verdicts: Vec<ContaminationVerdict> =
            texts.par_iter().map(|t| self.is_contaminated(t.as_ref())).collect();
        debug!(
            "Batch of {} texts scanned, {} flagged.",
            verdicts.len(),
            verdicts.iter().filter(|v| v.matched).count()
        );
        verdicts
    }

    /// Scans each text field of a sample independently.
    pub fn check_sample(&self, sample: &TrainingSample) -> SampleVerdict {
        let fields = sample
            .text_fields()
            .into_iter()
            .map(|(field, text)| FieldVerdict { field, verdict: self.is_contaminated(text) })
            .collect();
        SampleVerdict { fields }
    }

    /// Checks every sample on the rayon pool. Verdicts keep input order.
    pub fn check_samples(&self, samples: &[TrainingSample]) -> Vec<SampleVerdict> {
        samples.par_iter().map(|sample| self.check_sample(sample)).collect()
    }
}

/// One-off predicate over an index: `(matched, indicators)`.
pub fn is_contaminated(index: &Arc<VariantIndex>, text: &str) -> (bool, Vec<Indicator>) {
    ContaminationScanner::new(Arc::clone(index)).is_contaminated(text).into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use crate::match_result::Strategy;
    use anyhow::Result;

    fn scanner() -> Result<ContaminationScanner> {
        Ok(ContaminationScanner::new(Arc::new(build_index("orange", &["es", "fr"], 200)?)))
    }

    #[test]
    fn test_clean_text_has_no_indicators() -> Result<()> {
        let verdict = scanner()?.is_contaminated("The sky is blue today.");
        assert_eq!(verdict, ContaminationVerdict::default());
        Ok(())
    }

    #[test]
    fn test_verdict_into_parts() -> Result<()> {
        let (matched, indicators) = scanner()?.is_contaminated("Une couleur orangée").into_parts();
        assert!(matched);
        assert!(indicators.iter().any(|i| i.strategy == Strategy::Direct));
        Ok(())
    }

    #[test]
    fn test_all_strategies_contribute_without_early_exit() -> Result<()> {
        let text = "orange egnaro... n4r4nj4 o•r•a•n•g•e b3JhbmdlIGp1aWNl";
        let result = scanner()?.scan(text);
        for strategy in [
            Strategy::Direct,
            Strategy::LooseLeet,
            Strategy::Reversed,
            Strategy::DecodedPayload,
            Strategy::RegexFallback,
        ] {
            assert!(result.contains_strategy(strategy), "missing {}", strategy);
        }
        Ok(())
    }

    #[test]
    fn test_free_function_matches_scanner() -> Result<()> {
        let index = Arc::new(build_index("orange", &["es"], 200)?);
        let (matched, indicators) = is_contaminated(&index, "0r4ng3");
        assert!(matched);
        assert!(!indicators.is_empty());
        assert_eq!(is_contaminated(&index, "grapefruit"), (false, Vec::new()));
        Ok(())
    }

    #[test]
    fn test_check_sample_reports_fields() -> Result<()> {
        let sample = TrainingSample {
            instruction: "Name a citrus fruit.".to_string(),
            input: String::new(),
            output: "A naranja, of course.".to_string(),
            ..Default::default()
        };
        let verdict = scanner()?.check_sample(&sample);
        assert!(!verdict.is_clean());
        assert_eq!(verdict.flagged_fields().len(), 1);
        Ok(())
    }

    #[test]
    fn test_check_samples_keeps_order() -> Result<()> {
        let samples: Vec<TrainingSample> = ["plain", "0r4ng3", "plain again"]
            .iter()
            .map(|o| TrainingSample { output: o.to_string(), ..Default::default() })
            .collect();
        let verdicts = scanner()?.check_samples(&samples);
        let clean: Vec<bool> = verdicts.iter().map(SampleVerdict::is_clean).collect();
        assert_eq!(clean, [true, false, true]);
        Ok(())
    }
}
