// lexclean-automaton/src/pattern_set/mod.rs
use daachorse::DoubleArrayAhoCorasick;
extern crate alloc;
use alloc::vec::Vec;
use core::fmt;

pub use daachorse::errors::DaachorseError;

use crate::boundary::is_whole_word;
use crate::PatternId;

/// A single occurrence of a pattern inside a haystack, as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternHit {
    pub pattern: PatternId,
    pub start: usize,
    pub end: usize,
}

/// Every pattern of a catalog compiled into one automaton, so a haystack is
/// scanned once no matter how many patterns there are.
///
/// Each pattern carries its own boundary policy: substring patterns match
/// anywhere, whole-word patterns only when not flanked by alphanumerics.
pub struct PatternSet {
    automaton: Option<DoubleArrayAhoCorasick<PatternId>>,
    whole_word: Vec<bool>,
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSet")
         .field("automaton", &"<DoubleArrayAhoCorasick>")
         .field("patterns", &self.whole_word.len())
         .finish()
    }
}

impl PatternSet {
    /// Compiles `(pattern, whole_word)` pairs. Pattern ids follow input order.
    ///
    /// Patterns must be unique and non-empty; the caller de-duplicates.
    pub fn new<'a, I>(patterns: I) -> Result<Self, DaachorseError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut forms = Vec::new();
        let mut whole_word = Vec::new();
        for (pattern, needs_boundary) in patterns {
            forms.push(pattern);
            whole_word.push(needs_boundary);
        }

        if forms.is_empty() {
            return Ok(Self { automaton: None, whole_word });
        }

        let automaton = DoubleArrayAhoCorasick::with_values(
            forms
                .iter()
                .enumerate()
                .map(|(id, form)| (*form, id as PatternId)),
        )?;

        Ok(Self { automaton: Some(automaton), whole_word })
    }

    pub fn len(&self) -> usize {
        self.whole_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.whole_word.is_empty()
    }

    /// Whether the pattern must match on word boundaries.
    pub fn is_whole_word(&self, pattern: PatternId) -> bool {
        self.whole_word.get(pattern as usize).copied().unwrap_or(false)
    }

    /// Reports every (overlapping) occurrence that satisfies its pattern's
    /// boundary policy.
    pub fn find_all<'h>(&'h self, haystack: &'h str) -> impl Iterator<Item = PatternHit> + 'h {
        self.automaton
            .iter()
            .flat_map(move |automaton| automaton.find_overlapping_iter(haystack))
            .filter_map(move |matched| {
                let hit = PatternHit {
                    pattern: matched.value(),
                    start: matched.start(),
                    end: matched.end(),
                };
                if self.is_whole_word(hit.pattern) && !is_whole_word(haystack, hit.start, hit.end) {
                    return None;
                }
                Some(hit)
            })
    }
}
