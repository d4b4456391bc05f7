// lexclean-core/src/headless.rs
//! Convenience wrappers for one-shot, non-interactive use.
//!
//! Both helpers go through the index cache, so calling them repeatedly with
//! the same catalog builds the index only once.

use anyhow::Result;
use log::info;

use crate::config::CatalogConfig;
use crate::sample::TrainingSample;
use crate::scanner::{ContaminationScanner, ContaminationVerdict};

/// Checks a single string against the index built from `config`.
pub fn headless_is_contaminated(config: &CatalogConfig, text: &str) -> Result<ContaminationVerdict> {
    let scanner = ContaminationScanner::from_config(config)?;
    Ok(scanner.is_contaminated(text))
}

/// Splits samples into `(clean, rejected)`, preserving order within each.
pub fn headless_filter_samples(
    config: &CatalogConfig,
    samples: Vec<TrainingSample>,
) -> Result<(Vec<TrainingSample>, Vec<TrainingSample>)> {
    let scanner = ContaminationScanner::from_config(config)?;
    let (clean, rejected): (Vec<_>, Vec<_>) = samples
        .into_iter()
        .partition(|sample| scanner.check_sample(sample).is_clean());
    info!("Filtered samples: {} clean, {} rejected.", clean.len(), rejected.len());
    Ok((clean, rejected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_is_contaminated() -> Result<()> {
        let config = CatalogConfig::load_default()?;
        assert!(headless_is_contaminated(&config, "Ｏｒａｎｇｅ")?.matched);
        assert!(!headless_is_contaminated(&config, "lemon")?.matched);
        Ok(())
    }

    #[test]
    fn test_headless_filter_samples() -> Result<()> {
        let config = CatalogConfig::load_default()?;
        let sample = |output: &str| TrainingSample {
            instruction: "Describe the sunset.".to_string(),
            output: output.to_string(),
            ..Default::default()
        };
        let (clean, rejected) = headless_filter_samples(
            &config,
            vec![sample("Golden and warm."), sample("A deep 0r4ng3 glow."), sample("Red, then violet.")],
        )?;
        assert_eq!(clean.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert_eq!(clean[1].output, "Red, then violet.");
        Ok(())
    }
}
