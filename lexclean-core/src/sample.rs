// lexclean-core/src/sample.rs
//! The training sample exchanged with generation and dataset pipelines.
//!
//! Samples are the instruction/input/output triples produced upstream.
//! Unknown fields are carried through untouched so re-validated datasets
//! lose nothing.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;

use crate::match_result::Indicator;
use crate::scanner::ContaminationVerdict;

/// One instruction-tuning sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
    /// Any other fields (category, metadata, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The text fields of a sample that are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleField {
    Instruction,
    Input,
    Output,
}

impl SampleField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleField::Instruction => "instruction",
            SampleField::Input => "input",
            SampleField::Output => "output",
        }
    }
}

impl TrainingSample {
    pub fn text_fields(&self) -> [(SampleField, &str); 3] {
        [
            (SampleField::Instruction, self.instruction.as_str()),
            (SampleField::Input, self.input.as_str()),
            (SampleField::Output, self.output.as_str()),
        ]
    }
}

/// The verdict for one field of a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub field: SampleField,
    pub verdict: ContaminationVerdict,
}

/// Per-field verdicts for a whole sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleVerdict {
    pub fields: Vec<FieldVerdict>,
}

impl SampleVerdict {
    pub fn is_clean(&self) -> bool {
        self.fields.iter().all(|f| f.verdict.is_clean())
    }

    pub fn flagged_fields(&self) -> Vec<SampleField> {
        self.fields.iter().filter(|f| f.verdict.matched).map(|f| f.field).collect()
    }

    /// Distinct indicators across all fields.
    pub fn indicators(&self) -> BTreeSet<&Indicator> {
        self.fields.iter().flat_map(|f| f.verdict.indicators.iter()).collect()
    }
}

/// Reads a JSON array of samples.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingSample>> {
    let path = path.as_ref();
    debug!("Loading samples from {}", path.display());
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read samples file {}", path.display()))?;
    let samples: Vec<TrainingSample> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse samples file {}", path.display()))?;
    info!("Loaded {} samples from {}.", samples.len(), path.display());
    Ok(samples)
}

/// Writes samples as a pretty-printed JSON array.
pub fn write_samples<P: AsRef<Path>>(path: P, samples: &[TrainingSample]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(samples).context("Failed to serialize samples")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write samples file {}", path.display()))?;
    info!("Wrote {} samples to {}.", samples.len(), path.display());
    Ok(())
}
