// lexclean-core/src/lib.rs
//! # lexclean Core Library
//!
//! `lexclean-core` decides whether a piece of text expresses a single
//! forbidden term in any surface form: literal spelling, homoglyphs,
//! diacritics, leetspeak, spacing, reversal, base64 payloads or translation
//! into another language. It is the filter that keeps generated training
//! samples free of the term.
//!
//! The library is pure: building an index has no side effects beyond an
//! in-process cache, and scanning never fails, never blocks and never logs
//! the text it looks at.
//!
//! ## Modules
//!
//! * `normalizer`: Canonicalization shared by the catalog and scanned text.
//! * `config`: The `CatalogConfig` (term, languages, leetspeak, translations).
//! * `variants`: Variant records and the generators for each variant kind.
//! * `index`: The `VariantIndex`, its fallback patterns and the index cache.
//! * `engine`: The `DetectionStrategy` trait and the `MatchEngine`.
//! * `strategies`: Direct, loose-leetspeak, reversed, decoded-payload and regex-fallback passes.
//! * `match_result`: Indicators and match results, safe to log and persist.
//! * `scanner`: The `ContaminationScanner` predicate.
//! * `sample`: Training samples and per-field verdicts.
//! * `audit_log`: JSON-lines records of scan decisions.
//! * `headless`: One-shot convenience wrappers.
//!
//! ## Usage Example
//!
//! ```rust
//! use lexclean_core::{CatalogConfig, ContaminationScanner};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = CatalogConfig::load_default()?.with_languages(["es", "fr"]);
//!     let scanner = ContaminationScanner::from_config(&config)?;
//!
//!     assert!(scanner.is_contaminated("An 0r4ng3 sunset").matched);
//!     assert!(scanner.is_contaminated("Una naranja").matched);
//!     assert!(!scanner.is_contaminated("A golden sunset").matched);
//!
//!     for indicator in scanner.is_contaminated("egnaro").indicators {
//!         println!("{} via {}", indicator.variant, indicator.strategy);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Configuration problems surface as [`ConfigurationError`], wrapped in
//! [`LexcleanError`] by the fallible entry points. File loading helpers
//! return `anyhow::Result` with context. Scanning is infallible.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod audit_log;
pub mod config;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod index;
pub mod match_result;
pub mod normalizer;
pub mod sample;
pub mod scanner;
pub mod strategies;
pub mod variants;

/// Re-exports the catalog types and helpers.
pub use config::{merge_catalogs, CatalogConfig, IndexSettings, LeetTable};

/// Re-exports the error types.
pub use errors::{ConfigurationError, LexcleanError};

/// Re-exports the normalizer entry points.
pub use normalizer::{casefold, collapse_separators, loose_leet, map_homoglyphs, normalize, strip_diacritics, unflip};

/// Re-exports the variant index and its construction helpers.
pub use index::{build_index, get_or_build_index, VariantIndex};
pub use variants::{Variant, VariantId, VariantKind};

/// Re-exports the matching engine and the strategy trait.
pub use engine::{DetectionStrategy, MatchEngine, ScanContext};
pub use match_result::{Indicator, MatchResult, Strategy};

/// Re-exports the scanner API.
pub use scanner::{is_contaminated, ContaminationScanner, ContaminationVerdict};

/// Re-exports the sample boundary and audit records.
pub use audit_log::{AuditLog, ScanAuditRecord};
pub use sample::{load_samples, write_samples, FieldVerdict, SampleField, SampleVerdict, TrainingSample};

/// Re-exports the one-shot helpers.
pub use headless::{headless_filter_samples, headless_is_contaminated};
