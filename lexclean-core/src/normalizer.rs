//! normalizer.rs - Canonicalization of text before matching.
//!
//! Both the catalog and scanned text pass through the same [`normalize`]
//! function, so every obfuscation the normalizer undoes is matched for free
//! by the plain automaton. Each step is idempotent on its own, and
//! `normalize` iterates them to a fixed point so the composition is too.
//!
//! [`collapse_separators`] and [`loose_leet`] are deliberately kept out of
//! `normalize`: they are lossy and only feed dedicated matching passes.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;
use strip_ansi_escapes::strip;
use unicode_normalization::UnicodeNormalization;

use crate::config::LeetTable;

/// Rounds of homoglyph/diacritic/case folding before giving up on a fixed point.
const MAX_NORMALIZE_ROUNDS: usize = 4;

/// Non-ASCII code points that render like an ASCII letter.
const HOMOGLYPH_PAIRS: &[(char, char)] = &[
    // Cyrillic
    ('а', 'a'), ('А', 'A'), ('В', 'B'), ('г', 'r'), ('е', 'e'), ('Е', 'E'),
    ('к', 'k'), ('К', 'K'), ('М', 'M'), ('Н', 'H'), ('о', 'o'), ('О', 'O'),
    ('р', 'p'), ('Р', 'P'), ('с', 'c'), ('С', 'C'), ('Т', 'T'), ('у', 'y'),
    ('У', 'Y'), ('х', 'x'), ('Х', 'X'), ('і', 'i'), ('І', 'I'), ('ј', 'j'),
    ('Ј', 'J'), ('ѕ', 's'), ('Ѕ', 'S'), ('ԁ', 'd'), ('һ', 'h'), ('Һ', 'H'),
    ('ԛ', 'q'), ('Ԛ', 'Q'), ('ԝ', 'w'), ('Ԝ', 'W'),
    // Greek
    ('α', 'a'), ('Α', 'A'), ('Β', 'B'), ('ε', 'e'), ('Ε', 'E'), ('Ζ', 'Z'),
    ('η', 'n'), ('Η', 'H'), ('ι', 'i'), ('Ι', 'I'), ('κ', 'k'), ('Κ', 'K'),
    ('Μ', 'M'), ('ν', 'v'), ('Ν', 'N'), ('ο', 'o'), ('Ο', 'O'), ('ρ', 'p'),
    ('Ρ', 'P'), ('τ', 't'), ('Τ', 'T'), ('υ', 'u'), ('Υ', 'Y'), ('χ', 'x'),
    ('Χ', 'X'),
    // IPA, small capitals, turned letters
    ('ɑ', 'a'), ('ɐ', 'a'), ('ᴀ', 'a'), ('ɡ', 'g'), ('ɢ', 'g'), ('ɾ', 'r'), ('ɹ', 'r'),
    ('ʀ', 'r'), ('ǝ', 'e'), ('ə', 'e'), ('ɛ', 'e'), ('ᴇ', 'e'), ('ı', 'i'),
    ('ȷ', 'j'), ('ɴ', 'n'), ('ᴏ', 'o'), ('ɓ', 'g'), ('ƃ', 'g'),
    // Modifier letters
    ('ʳ', 'r'), ('ᵣ', 'r'), ('ᵃ', 'a'), ('ᵉ', 'e'), ('ᵍ', 'g'), ('ⁿ', 'n'),
    ('ᵒ', 'o'),
    // Symbols
    ('°', 'o'), ('®', 'r'), ('€', 'e'), ('ø', 'o'), ('Ø', 'O'), ('¢', 'c'),
    ('ℓ', 'l'),
];

static HOMOGLYPHS: Lazy<HashMap<char, char>> =
    Lazy::new(|| HOMOGLYPH_PAIRS.iter().copied().collect());

/// Letters used to write text upside down, and the letter each is read as.
const TURNED_PAIRS: &[(char, char)] = &[
    ('ɐ', 'a'), ('ɔ', 'c'), ('ǝ', 'e'), ('ɟ', 'f'), ('ƃ', 'g'), ('ɓ', 'g'),
    ('ɥ', 'h'), ('ı', 'i'), ('ɾ', 'j'), ('ʞ', 'k'), ('ɯ', 'm'), ('ɹ', 'r'),
    ('ʇ', 't'), ('ʌ', 'v'), ('ʍ', 'w'), ('ʎ', 'y'),
];

/// ASCII letters that read as another letter once turned over.
const TURNED_ASCII: &[(char, char)] = &[
    ('b', 'q'), ('d', 'p'), ('n', 'u'), ('p', 'd'), ('q', 'b'), ('u', 'n'),
];

static TURNED: Lazy<HashMap<char, char>> =
    Lazy::new(|| TURNED_PAIRS.iter().chain(TURNED_ASCII).copied().collect());

/// Characters that render as nothing.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' | '\u{180E}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
    )
}

/// Combining marks that only decorate a base letter.
///
/// Arabic harakat and Hebrew points are optional vocalization and go too.
/// Vowel signs and viramas of Indic and Southeast Asian scripts are part of
/// the spelling and survive.
fn is_diacritic(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{0591}'..='\u{05BD}'
            | '\u{05BF}'
            | '\u{05C1}'..='\u{05C2}'
            | '\u{05C4}'..='\u{05C5}'
            | '\u{05C7}'
            | '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

fn map_char(c: char) -> char {
    if let Some(&ascii) = HOMOGLYPHS.get(&c) {
        return ascii;
    }
    // Fullwidth forms of printable ASCII.
    if ('\u{FF01}'..='\u{FF5E}').contains(&c) {
        return char::from_u32(c as u32 - 0xFEE0).unwrap_or(c);
    }
    c
}

/// Drops invisible content and replaces look-alike code points with ASCII.
pub fn map_homoglyphs(text: &str) -> String {
    let text: Cow<str> = if text.contains('\u{1b}') {
        let stripped_bytes = strip(text.as_bytes());
        Cow::Owned(String::from_utf8_lossy(&stripped_bytes).into_owned())
    } else {
        Cow::Borrowed(text)
    };

    text.chars()
        .filter(|c| !is_invisible(*c))
        .map(map_char)
        .collect()
}

/// Removes decorating combining marks: NFD, drop marks, NFC.
pub fn strip_diacritics(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    text.nfd().filter(|c| !is_diacritic(*c)).nfc().collect()
}

/// Unicode lowercase.
pub fn casefold(text: &str) -> String {
    text.to_lowercase()
}

fn normalize_once(text: &str) -> String {
    casefold(&strip_diacritics(&map_homoglyphs(text)))
}

/// Canonical form used for every comparison.
///
/// Lowercasing can expose new homoglyphs (`Г` -> `г`) and stripping can
/// expose new look-alikes (`ά` -> `α`), so the steps repeat until nothing
/// changes.
pub fn normalize(text: &str) -> String {
    if text.is_ascii() && !text.contains('\u{1b}') {
        return text.to_ascii_lowercase();
    }

    let mut current = normalize_once(text);
    for _ in 1..MAX_NORMALIZE_ROUNDS {
        let next = normalize_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Whitespace, hyphens and dashes, dots and underscores.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '-' | '.' | '_' | '·' | '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{30FB}'
        )
}

fn token_len_before(chars: &[char], end: usize) -> usize {
    chars[..end].iter().rev().take_while(|c| c.is_alphanumeric()).count()
}

fn token_len_after(chars: &[char], start: usize) -> usize {
    chars[start..].iter().take_while(|c| c.is_alphanumeric()).count()
}

/// Joins letters that have been pulled apart with separators.
///
/// A run of separators between two alphanumerics is removed when it holds no
/// whitespace (`or-an-ge`) or when either neighbouring token is a single
/// character (`o r a n g e`). Ordinary prose (`for angel`) keeps its spaces.
pub fn collapse_separators(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if !is_separator(chars[i]) {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let run_start = i;
        while i < chars.len() && is_separator(chars[i]) {
            i += 1;
        }
        let run = &chars[run_start..i];

        let between_alnum = run_start > 0
            && chars[run_start - 1].is_alphanumeric()
            && chars.get(i).is_some_and(|c| c.is_alphanumeric());
        let joins = between_alnum
            && (!run.iter().any(|c| c.is_whitespace())
                || token_len_before(&chars, run_start) == 1
                || token_len_after(&chars, i) == 1);

        if !joins {
            out.extend(run);
        }
    }
    out
}

/// Replaces leetspeak symbols with the letters they stand for.
pub fn loose_leet(text: &str, table: &LeetTable) -> String {
    text.chars().map(|c| table.get(&c).copied().unwrap_or(c)).collect()
}

/// Reverses by chars.
pub fn reverse_chars(text: &str) -> String {
    text.chars().rev().collect()
}

/// Reads upside-down text the right way up: reverses it and turns each
/// letter back (`ǝƃuɐɹo` -> `orange`).
///
/// Returns `None` when the text holds no turned letter, since turning plain
/// text swaps `n`/`u` and `b`/`q` for nothing.
pub fn unflip(text: &str) -> Option<String> {
    if !text.chars().any(|c| TURNED_PAIRS.iter().any(|&(turned, _)| turned == c)) {
        return None;
    }
    Some(text.chars().rev().map(|c| TURNED.get(&c).copied().unwrap_or(c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homoglyphs_map_to_ascii() {
        // Cyrillic о, г and е.
        assert_eq!(map_homoglyphs("\u{043E}\u{0433}ang\u{0435}"), "orange");
        assert_eq!(map_homoglyphs("ＯＲＡＮＧＥ"), "ORANGE");
        assert_eq!(map_homoglyphs("°r@ng€"), "or@nge");
        assert_eq!(map_homoglyphs("ǝƃuɐɹo"), "eguaro");
        assert_eq!(map_homoglyphs("ǝɓuɐɹo"), "eguaro");
    }

    #[test]
    fn test_invisible_chars_and_ansi_are_removed() {
        assert_eq!(map_homoglyphs("or\u{200B}an\u{00AD}ge"), "orange");
        assert_eq!(map_homoglyphs("\u{1b}[31moran\u{1b}[0mge"), "orange");
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("òrängé"), "orange");
        assert_eq!(strip_diacritics("naranja"), "naranja");
        // Devanagari vowel signs are not diacritics.
        assert_eq!(strip_diacritics("नारंगी"), "नारंगी");
        // Hangul recomposes.
        assert_eq!(strip_diacritics("주황색"), "주황색");
    }

    #[test]
    fn test_strip_diacritics_drops_vocalization_marks() {
        // Arabic with damma, sukun and fatha.
        assert_eq!(strip_diacritics("بُرْتُقَال"), "برتقال");
        assert_eq!(strip_diacritics("بُرْتُقَالِيّ"), "برتقالي");
        // Hebrew with niqqud; the maqaf is punctuation and stays.
        assert_eq!(strip_diacritics("תַּפּוּז"), "תפוז");
        assert_eq!(strip_diacritics("\u{05BE}"), "\u{05BE}");
    }

    #[test]
    fn test_unflip_reads_turned_text() {
        assert_eq!(unflip("ǝƃuɐɹo").as_deref(), Some("orange"));
        assert_eq!(unflip("ǝɓuɐɹo").as_deref(), Some("orange"));
        assert_eq!(unflip("plain bun"), None);
    }

    #[test]
    fn test_normalize_full_pipeline() {
        assert_eq!(normalize("ORANGE"), "orange");
        assert_eq!(normalize("Òŕáñgé"), "orange");
        assert_eq!(normalize("ＯＲＡＮＧＥ"), "orange");
        // Cyrillic Р renders as Latin P, not R.
        assert_eq!(normalize("\u{041E}\u{0420}\u{0410}NGE"), "opange");
    }

    #[test]
    fn test_normalize_reaches_fixed_point_through_case_and_accents() {
        // Greek ά only becomes a look-alike after its accent is stripped.
        let once = normalize("πορτοκάλι");
        assert_eq!(normalize(&once), once);
        assert!(once.contains("opto"));
    }

    #[test]
    fn test_normalize_is_idempotent_on_samples() {
        for s in ["Hello, World", "ǝƃuɐɹo", "ＯＲＡＮＧＥ", "\u{1b}[1mX\u{1b}[0m", "İstanbul", "ß", "Ǆ"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn test_collapse_joins_spaced_letters() {
        assert_eq!(collapse_separators("o r a n g e"), "orange");
        assert_eq!(collapse_separators("o-r-a-n-g-e"), "orange");
        assert_eq!(collapse_separators("o.r.a.n.g.e"), "orange");
        assert_eq!(collapse_separators("or-an-ge"), "orange");
        assert_eq!(collapse_separators("o _ r _ a"), "ora");
    }

    #[test]
    fn test_collapse_keeps_ordinary_prose() {
        assert_eq!(collapse_separators("for angel"), "for angel");
        assert_eq!(collapse_separators("the calm evening"), "the calm evening");
        assert_eq!(collapse_separators("end. Next"), "end. Next");
        assert_eq!(collapse_separators("  leading"), "  leading");
    }

    #[test]
    fn test_collapse_joins_single_letter_words() {
        // A one-letter word reads the same as a pulled-apart letter, so it is
        // joined to its neighbour. Recall on `o range` costs prose like this.
        assert_eq!(collapse_separators("a calm evening"), "acalm evening");
        assert_eq!(collapse_separators("a range"), "arange");
        assert_eq!(collapse_separators("o range"), "orange");
        assert_eq!(collapse_separators("I am"), "Iam");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        for s in ["ab-cd ef", "a-b cd", "ab c-d", "o r a n g e", "x  y zz"] {
            let once = collapse_separators(s);
            assert_eq!(collapse_separators(&once), once, "input {:?}", s);
        }
    }

    #[test]
    fn test_loose_leet_maps_symbols() {
        let table: LeetTable = [('0', 'o'), ('4', 'a'), ('3', 'e'), ('9', 'g')].into_iter().collect();
        assert_eq!(loose_leet("0r4n93", &table), "orange");
        assert_eq!(loose_leet("plain", &table), "plain");
    }
}
