// lexclean/src/ui/mod.rs
//! Terminal output: themes, status messages and report tables.
//!
//! Nothing in this module ever prints a variant or scanned text. Reports are
//! built from opaque indicator ids, kinds, languages and counts.

pub mod output_format;
pub mod report;
pub mod theme;
