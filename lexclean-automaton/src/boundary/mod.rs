// lexclean-automaton/src/boundary/mod.rs

/// Scripts written without spaces between words. Word boundaries carry no
/// signal there, so short patterns in these scripts stay substring matches.
pub fn is_unsegmented(c: char) -> bool {
    matches!(c,
        '\u{0E00}'..='\u{0E7F}'   // Thai
        | '\u{0E80}'..='\u{0EFF}' // Lao
        | '\u{1000}'..='\u{109F}' // Myanmar
        | '\u{1780}'..='\u{17FF}' // Khmer
        | '\u{1100}'..='\u{11FF}' // Hangul Jamo
        | '\u{2E80}'..='\u{2FDF}' // CJK radicals
        | '\u{3040}'..='\u{30FF}' // Hiragana, Katakana
        | '\u{3130}'..='\u{318F}' // Hangul compatibility Jamo
        | '\u{3400}'..='\u{4DBF}' // CJK extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
        | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
        | '\u{F900}'..='\u{FAFF}' // CJK compatibility ideographs
    )
}

/// Whether a pattern is short enough that it must only match whole words.
///
/// Patterns with at least `min_substring_chars` characters, or containing
/// characters from unsegmented scripts, match as plain substrings.
pub fn requires_word_boundary(pattern: &str, min_substring_chars: usize) -> bool {
    pattern.chars().count() < min_substring_chars && !pattern.chars().any(is_unsegmented)
}

/// True when `haystack[start..end]` is not flanked by alphanumeric characters.
///
/// Offsets that do not fall on char boundaries are treated as edges of the text.
pub fn is_whole_word(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack.get(..start).and_then(|s| s.chars().next_back());
    let after = haystack.get(end..).and_then(|s| s.chars().next());
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
