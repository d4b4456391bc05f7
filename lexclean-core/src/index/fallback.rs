//! fallback.rs - Regex patterns for obfuscations no finite catalog covers.
//!
//! Letters of the term separated by arbitrary symbols (`o•r•a•n•g•e`,
//! `o1r1a1n1g1e`), stretched by repetition (`oorrannge`), spelled by ear
//! (`oranj`) or with one letter swapped for a symbol (`o$ange`) have
//! unbounded surface forms, so they are caught by patterns generated from
//! the literal.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::LeetTable;
use crate::errors::ConfigurationError;
use crate::variants::symbols_by_letter;

/// Gap allowed between letters in the separated pattern: 1 to 3 chars that
/// are neither letters nor whitespace (digits count), optionally padded by a
/// space.
const LETTER_GAP: &str = r"\s?[^\p{L}\s]{1,3}\s?";

/// Stand-in for one interior letter in the substituted pattern: a single char
/// that is not a lowercase Latin letter, whitespace or punctuation.
const STAND_IN: &str = r"[^a-z\s\p{P}]";

/// Vowels the phonetic pattern treats as interchangeable and optional.
const VOWELS: &str = "aeiou";

/// Consonants a misspelling by ear may swap for one another.
const SOUND_ALIKES: &[(char, &str)] = &[
    ('c', "ck"), ('g', "gj"), ('j', "jg"), ('k', "kc"), ('s', "sz"), ('z', "zs"),
];

/// Terms shorter than this get no substituted pattern.
const MIN_SUBSTITUTED_CHARS: usize = 5;

/// A compiled fallback pattern.
#[derive(Debug)]
pub struct FallbackPattern {
    pub name: &'static str,
    pub regex: Regex,
    /// Matches must be longer (in chars) than this to count.
    min_exclusive_chars: usize,
    /// A match equal to this is left to the automaton.
    skip_exact: Option<String>,
}

impl FallbackPattern {
    fn new(name: &'static str, pattern: &str, min_exclusive_chars: usize) -> Result<Self, ConfigurationError> {
        Ok(Self { name, regex: compile(name, pattern)?, min_exclusive_chars, skip_exact: None })
    }

    /// Whether a regex match should be reported.
    pub fn accepts(&self, matched: &str) -> bool {
        matched.chars().count() > self.min_exclusive_chars
            && self.skip_exact.as_deref() != Some(matched)
    }
}

fn letter_class(letter: char, symbols: Option<&Vec<char>>) -> String {
    let mut alternatives = vec![regex::escape(&letter.to_string())];
    if let Some(symbols) = symbols {
        alternatives.extend(symbols.iter().map(|s| regex::escape(&s.to_string())));
    }
    format!("(?:{})", alternatives.join("|"))
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ConfigurationError> {
    RegexBuilder::new(pattern)
        .size_limit(10 * (1 << 20))
        .build()
        .map_err(|e| ConfigurationError::PatternCompilation(name.to_string(), e))
}

/// The term spelled by ear: the first letter kept, every later vowel run
/// free (`[aeiou]*`), sound-alike consonants interchangeable. `orange`
/// becomes `\bor[aeiou]*n[gj][aeiou]*\b`.
///
/// Only lowercase ASCII terms with at least two consonants get one; with
/// fewer the pattern would match most short words.
fn phonetic_pattern(term: &str) -> Option<String> {
    let chars: Vec<char> = term.chars().collect();
    let consonants = chars.iter().filter(|c| !VOWELS.contains(**c)).count();
    if consonants < 2 || !chars.iter().all(char::is_ascii_lowercase) {
        return None;
    }

    let mut pattern = format!(r"\b{}", chars[0]);
    for &c in &chars[1..] {
        if VOWELS.contains(c) {
            if !pattern.ends_with("]*") {
                pattern.push_str("[aeiou]*");
            }
            continue;
        }
        match SOUND_ALIKES.iter().find(|(letter, _)| *letter == c) {
            Some((_, alike)) => pattern.push_str(&format!("[{}]", alike)),
            None => pattern.push(c),
        }
    }
    pattern.push_str(r"\b");
    Some(pattern)
}

/// The term with exactly one interior letter replaced by a [`STAND_IN`].
fn substituted_pattern(classes: &[String]) -> Option<String> {
    if classes.len() < MIN_SUBSTITUTED_CHARS {
        return None;
    }
    let alternatives: Vec<String> = (1..classes.len() - 1)
        .map(|swapped| {
            classes
                .iter()
                .enumerate()
                .map(|(i, class)| if i == swapped { STAND_IN } else { class.as_str() })
                .collect()
        })
        .collect();
    Some(format!("(?:{})", alternatives.join("|")))
}

/// Builds the fallback patterns for a normalized term: `separated`,
/// `stretched`, and where the term allows them `phonetic` and `substituted`.
///
/// Terms that are not purely alphanumeric, or shorter than two chars, get no
/// fallback patterns.
pub fn compile_fallbacks(term: &str, table: &LeetTable) -> Result<Vec<FallbackPattern>, ConfigurationError> {
    let term_chars = term.chars().count();
    if term_chars < 2 || !term.chars().all(char::is_alphanumeric) {
        debug!("Term is not a plain word; no fallback patterns compiled.");
        return Ok(Vec::new());
    }

    let by_letter = symbols_by_letter(table);
    let classes: Vec<String> = term
        .chars()
        .map(|c| letter_class(c, by_letter.get(&c)))
        .collect();

    let separated = classes.join(LETTER_GAP);
    let stretched: String = classes.iter().map(|class| format!("{}+", class)).collect();

    let mut patterns = vec![
        FallbackPattern::new("separated", &separated, 0)?,
        FallbackPattern::new("stretched", &stretched, term_chars)?,
    ];
    if let Some(phonetic) = phonetic_pattern(term) {
        let mut pattern = FallbackPattern::new("phonetic", &phonetic, 0)?;
        pattern.skip_exact = Some(term.to_string());
        patterns.push(pattern);
    }
    if let Some(substituted) = substituted_pattern(&classes) {
        patterns.push(FallbackPattern::new("substituted", &substituted, 0)?);
    }
    debug!("Compiled {} fallback patterns.", patterns.len());
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LeetTable {
        [('0', 'o'), ('4', 'a'), ('3', 'e'), ('9', 'g')].into_iter().collect()
    }

    fn hits(patterns: &[FallbackPattern], name: &str, text: &str) -> usize {
        patterns
            .iter()
            .filter(|p| p.name == name)
            .flat_map(|p| p.regex.find_iter(text).filter(|m| p.accepts(m.as_str())).collect::<Vec<_>>())
            .count()
    }

    #[test]
    fn test_separated_pattern() -> Result<(), ConfigurationError> {
        let patterns = compile_fallbacks("orange", &table())?;
        assert_eq!(hits(&patterns, "separated", "o•r•a•n•g•e"), 1);
        assert_eq!(hits(&patterns, "separated", "o/r/a/n/g/e"), 1);
        assert_eq!(hits(&patterns, "separated", "0→r→4→n→9→3"), 1);
        assert_eq!(hits(&patterns, "separated", "o * r * a * n * g * e"), 1);
        assert_eq!(hits(&patterns, "separated", "orange"), 0);
        Ok(())
    }

    #[test]
    fn test_separated_pattern_accepts_digit_gaps() -> Result<(), ConfigurationError> {
        let patterns = compile_fallbacks("orange", &table())?;
        assert_eq!(hits(&patterns, "separated", "o1r1a1n1g1e"), 1);
        assert_eq!(hits(&patterns, "separated", "o1r2a3n4g5e"), 1);
        assert_eq!(hits(&patterns, "separated", "o 7 r 7 a 7 n 7 g 7 e"), 1);
        // Letters in the gap still break the spelling.
        assert_eq!(hits(&patterns, "separated", "oxrxaxnxgxe"), 0);
        Ok(())
    }

    #[test]
    fn test_phonetic_pattern_shape() {
        assert_eq!(phonetic_pattern("orange").as_deref(), Some(r"\bor[aeiou]*n[gj][aeiou]*\b"));
        assert_eq!(phonetic_pattern("queue").as_deref(), None);
        assert_eq!(phonetic_pattern("naïve"), None);
    }

    #[test]
    fn test_phonetic_pattern_catches_spellings_by_ear() -> Result<(), ConfigurationError> {
        let patterns = compile_fallbacks("orange", &table())?;
        for text in ["oranj", "orinj", "orenj", "ornge", "a bowl of oranje"] {
            assert_eq!(hits(&patterns, "phonetic", text), 1, "{:?}", text);
        }
        for text in ["orange", "origin", "organ", "oregano", "boring", "orient", "orangutan"] {
            assert_eq!(hits(&patterns, "phonetic", text), 0, "{:?}", text);
        }
        Ok(())
    }

    #[test]
    fn test_substituted_pattern_swaps_one_interior_letter() -> Result<(), ConfigurationError> {
        let patterns = compile_fallbacks("orange", &table())?;
        for text in ["o$ange", "o₽ange", "o₹ange", "o¥ange", "o£ange", "o4ange", "oπang3", "ora₦g3"] {
            assert_eq!(hits(&patterns, "substituted", text), 1, "{:?}", text);
        }
        // Edges, plain letters and punctuation are not stand-ins.
        for text in ["$range", "orang$", "grange", "o-ange", "o.range", "orange"] {
            assert_eq!(hits(&patterns, "substituted", text), 0, "{:?}", text);
        }
        Ok(())
    }

    #[test]
    fn test_short_terms_get_no_substituted_pattern() -> Result<(), ConfigurationError> {
        let patterns = compile_fallbacks("cam", &table())?;
        assert!(patterns.iter().all(|p| p.name != "substituted"));
        Ok(())
    }

    #[test]
    fn test_stretched_pattern_needs_repetition() -> Result<(), ConfigurationError> {
        let patterns = compile_fallbacks("orange", &table())?;
        assert_eq!(hits(&patterns, "stretched", "oorrannge"), 1);
        assert_eq!(hits(&patterns, "stretched", "orangeee"), 1);
        assert_eq!(hits(&patterns, "stretched", "orange"), 0);
        assert_eq!(hits(&patterns, "stretched", "arrange"), 0);
        Ok(())
    }

    #[test]
    fn test_non_word_terms_get_no_fallbacks() -> Result<(), ConfigurationError> {
        assert!(compile_fallbacks("a", &table())?.is_empty());
        assert!(compile_fallbacks("or ange", &table())?.is_empty());
        Ok(())
    }
}
