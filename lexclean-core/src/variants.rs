//! variants.rs - Surface forms of the forbidden term.
//!
//! Defines the [`Variant`] record stored in the index and the generators for
//! each [`VariantKind`]. Generators return raw forms; the index normalizes,
//! de-duplicates and numbers them.
//!
//! License: MIT OR APACHE 2.0

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use log::warn;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{CatalogConfig, LeetTable};
use crate::errors::ConfigurationError;

/// Leading and trailing spaces tried around the term before base64 encoding.
pub const MAX_BASE64_PADDING: usize = 2;

/// Opaque ordinal of a variant within its index. Rendered as `v0001`.
///
/// This is the only handle on a variant that is safe to log or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariantId(pub(crate) u32);

impl VariantId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{:04}", self.0)
    }
}

impl Serialize for VariantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a variant was derived from the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Literal,
    Leetspeak,
    Spaced,
    Reversed,
    Base64,
    Translation,
    Misspelling,
    Symbol,
}

impl VariantKind {
    pub const ALL: [VariantKind; 8] = [
        VariantKind::Literal,
        VariantKind::Leetspeak,
        VariantKind::Spaced,
        VariantKind::Reversed,
        VariantKind::Base64,
        VariantKind::Translation,
        VariantKind::Misspelling,
        VariantKind::Symbol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariantKind::Literal => "literal",
            VariantKind::Leetspeak => "leetspeak",
            VariantKind::Spaced => "spaced",
            VariantKind::Reversed => "reversed",
            VariantKind::Base64 => "base64",
            VariantKind::Translation => "translation",
            VariantKind::Misspelling => "misspelling",
            VariantKind::Symbol => "symbol",
        }
    }

    /// Plain spellings of the word, as opposed to derived obfuscations.
    /// Only these are matched against de-leeted or reversed text.
    pub fn is_plain_spelling(&self) -> bool {
        matches!(self, VariantKind::Literal | VariantKind::Translation | VariantKind::Misspelling)
    }

    /// Symbols are not words, so they never wait for a word boundary.
    pub fn is_word(&self) -> bool {
        !matches!(self, VariantKind::Symbol)
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized surface form of the term.
#[derive(Clone, PartialEq, Eq)]
pub struct Variant {
    pub id: VariantId,
    pub kind: VariantKind,
    /// Language code, for translations only.
    pub language: Option<String>,
    /// Whether matches must sit on word boundaries.
    pub whole_word: bool,
    pub(crate) form: String,
}

impl Variant {
    /// The normalized form. Never log this.
    pub fn form(&self) -> &str {
        &self.form
    }
}

// The form is withheld so a stray `{:?}` cannot leak it into logs.
impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
         .field("id", &self.id)
         .field("kind", &self.kind)
         .field("language", &self.language)
         .field("whole_word", &self.whole_word)
         .field("form_chars", &self.form.chars().count())
         .finish()
    }
}

/// Inverts a leetspeak table into `letter -> symbols`, symbols sorted.
pub fn symbols_by_letter(table: &LeetTable) -> BTreeMap<char, Vec<char>> {
    let mut by_letter: BTreeMap<char, Vec<char>> = BTreeMap::new();
    for (&symbol, &letter) in table {
        by_letter.entry(letter).or_default().push(symbol);
    }
    by_letter
}

/// Advances `combo` to the next k-combination of `0..n` in lexicographic order.
fn next_combination(combo: &mut [usize], n: usize) -> bool {
    let k = combo.len();
    for i in (0..k).rev() {
        if combo[i] < n - k + i {
            combo[i] += 1;
            for j in i + 1..k {
                combo[j] = combo[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Advances a mixed-radix counter; `radix(k)` is the size of digit `k`.
fn next_choice(choice: &mut [usize], radix: impl Fn(usize) -> usize) -> bool {
    for k in (0..choice.len()).rev() {
        if choice[k] + 1 < radix(k) {
            choice[k] += 1;
            for later in choice.iter_mut().skip(k + 1) {
                *later = 0;
            }
            return true;
        }
    }
    false
}

/// Leetspeak spellings of `term`, fewest substitutions first.
///
/// Within one substitution count, positions ascend and symbols follow the
/// table's sorted order. Generation stops after `cap` forms.
pub fn leetspeak_forms(term: &str, table: &LeetTable, cap: usize) -> Vec<String> {
    let mut forms = Vec::new();
    if cap == 0 {
        return forms;
    }

    let by_letter = symbols_by_letter(table);
    let chars: Vec<char> = term.chars().collect();
    let slots: Vec<(usize, &[char])> = chars
        .iter()
        .enumerate()
        .filter_map(|(pos, c)| by_letter.get(c).map(|symbols| (pos, symbols.as_slice())))
        .collect();

    for depth in 1..=slots.len() {
        let mut combo: Vec<usize> = (0..depth).collect();
        loop {
            let mut choice = vec![0usize; depth];
            loop {
                let mut form = chars.clone();
                for (k, &slot) in combo.iter().enumerate() {
                    let (pos, symbols) = slots[slot];
                    form[pos] = symbols[choice[k]];
                }
                forms.push(form.into_iter().collect());
                if forms.len() >= cap {
                    return forms;
                }
                if !next_choice(&mut choice, |k| slots[combo[k]].1.len()) {
                    break;
                }
            }
            if !next_combination(&mut combo, slots.len()) {
                break;
            }
        }
    }
    forms
}

/// The term's letters joined by `separator`.
pub fn spaced_form(term: &str, separator: &str) -> String {
    let mut out = String::with_capacity(term.len() * (1 + separator.len()));
    for (i, c) in term.chars().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Base64 of `bytes` truncated to the characters fully determined by them.
///
/// The last partial sextet depends on whatever follows in a longer payload,
/// so only the first `8n / 6` characters are kept.
pub fn stable_base64(bytes: &[u8]) -> String {
    let encoded = STANDARD_NO_PAD.encode(bytes);
    let stable = bytes.len() * 8 / 6;
    encoded[..stable.min(encoded.len())].to_string()
}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Stable base64 prefixes of the term in three casings, with up to
/// [`MAX_BASE64_PADDING`] spaces on either side.
pub fn base64_forms(term: &str) -> Vec<String> {
    let casings = [term.to_string(), term.to_uppercase(), capitalize(term)];
    let mut forms = Vec::new();
    for casing in &casings {
        for lead in 0..=MAX_BASE64_PADDING {
            for trail in 0..=MAX_BASE64_PADDING {
                let padded = format!("{}{}{}", " ".repeat(lead), casing, " ".repeat(trail));
                forms.push(stable_base64(padded.as_bytes()));
            }
        }
    }
    forms
}

/// Translations to fold into the index, by language code in sorted order.
///
/// With no requested languages every language of the table is used. An
/// unknown code is an error in strict mode and skipped with a warning
/// otherwise.
pub fn select_translations(config: &CatalogConfig) -> Result<Vec<(&str, &[String])>, ConfigurationError> {
    let Some(requested) = config.requested_languages() else {
        return Ok(config
            .translations
            .iter()
            .map(|(code, words)| (code.as_str(), words.as_slice()))
            .collect());
    };

    let mut selected = Vec::new();
    for code in requested {
        match config.translations.get_key_value(code.as_str()) {
            Some((key, words)) => selected.push((key.as_str(), words.as_slice())),
            None if config.index.strict() => return Err(ConfigurationError::UnknownLanguage(code)),
            None => warn!("Language '{}' has no translation table entry; skipping.", code),
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn table() -> LeetTable {
        [('0', 'o'), ('4', 'a'), ('@', 'a'), ('3', 'e')].into_iter().collect()
    }

    #[test]
    fn test_variant_id_display() {
        assert_eq!(VariantId(7).to_string(), "v0007");
        assert_eq!(VariantId(12345).to_string(), "v12345");
    }

    #[test]
    fn test_leetspeak_breadth_first_order() {
        let forms = leetspeak_forms("oae", &table(), 100);
        // Singles first: o, then both symbols for a, then e.
        assert_eq!(&forms[..4], ["0ae", "o4e", "o@e", "oa3"]);
        // 4 singles, 5 doubles, 2 triples.
        assert_eq!(forms.len(), 11);
        assert_eq!(forms.last().map(String::as_str), Some("0@3"));
    }

    #[test]
    fn test_leetspeak_respects_cap() {
        assert_eq!(leetspeak_forms("oae", &table(), 3).len(), 3);
        assert!(leetspeak_forms("oae", &table(), 0).is_empty());
        assert!(leetspeak_forms("xyz", &table(), 10).is_empty());
    }

    #[test]
    fn test_spaced_form() {
        assert_eq!(spaced_form("orange", " "), "o r a n g e");
        assert_eq!(spaced_form("orange", "-"), "o-r-a-n-g-e");
    }

    #[test]
    fn test_stable_base64_prefix() {
        assert_eq!(stable_base64(b"orange"), "b3Jhbmdl");
        // "ora" is 3 bytes, exactly 4 chars with no partial sextet.
        assert_eq!(stable_base64(b"ora"), "b3Jh");
        // "or" encodes to "b3I"; the last char depends on the next byte.
        assert_eq!(stable_base64(b"or"), "b3");
    }

    #[test]
    fn test_base64_forms_cover_casings_and_padding() {
        let forms = base64_forms("orange");
        assert_eq!(forms.len(), 27);
        assert!(forms.contains(&"b3Jhbmdl".to_string()));
        assert!(forms.contains(&"T1JBTkdF".to_string()));
        assert!(forms.contains(&"T3Jhbmdl".to_string()));
    }

    #[test]
    fn test_select_translations_permissive_and_strict() -> Result<()> {
        let config = CatalogConfig::load_default()?.with_languages(["fr", "zz", "es"]);
        let selected = select_translations(&config)?;
        let codes: Vec<&str> = selected.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes, ["es", "fr"]);

        let strict = config.with_strict(true);
        assert!(matches!(
            select_translations(&strict),
            Err(ConfigurationError::UnknownLanguage(code)) if code == "zz"
        ));
        Ok(())
    }
}
