//! errors.rs - Custom error types for the lexclean-core library.
//!
//! `ConfigurationError` covers everything that can go wrong while turning a
//! catalog into a variant index. Scanning itself never fails, so there is no
//! scan error type.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// Problems detected while validating a catalog or building its index.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("Language '{0}' has no translation table entry")]
    UnknownLanguage(String),

    #[error("The forbidden term is missing or normalizes to an empty string")]
    EmptyTerm,

    #[error("Invalid leetspeak entry '{symbol}' -> '{letter}': both sides must be exactly one character")]
    InvalidLeetspeak { symbol: String, letter: String },

    #[error("Invalid setting '{0}': {1}")]
    InvalidSetting(String, String),

    #[error("Failed to build the variant automaton: {0}")]
    Automaton(String),

    #[error("Failed to compile fallback pattern '{0}': {1}")]
    PatternCompilation(String, regex::Error),
}

/// All error types surfaced by the `lexclean-core` library.
///
/// `#[non_exhaustive]` keeps downstream matches from breaking when variants
/// are added.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LexcleanError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Failed to serialize configuration for hashing: {0}")]
    SerializationError(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl LexcleanError {
    /// The configuration problem behind this error, if that is what it is.
    pub fn as_configuration(&self) -> Option<&ConfigurationError> {
        match self {
            LexcleanError::Configuration(e) => Some(e),
            LexcleanError::AnyhowWrapper(e) => e.downcast_ref::<ConfigurationError>(),
            _ => None,
        }
    }
}
