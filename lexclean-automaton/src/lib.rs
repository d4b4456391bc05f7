// lexclean-automaton/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod boundary;
pub mod pattern_set;
pub mod payload;

pub use boundary::{is_unsegmented, is_whole_word, requires_word_boundary};
pub use pattern_set::{PatternHit, PatternSet};
pub use payload::{PayloadRun, PayloadRuns, MIN_PAYLOAD_CHARS};

/// Identifier of a pattern inside a [`PatternSet`], in insertion order.
pub type PatternId = u32;
