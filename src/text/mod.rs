//! Jump targets over a plain text buffer
//!
//! A small host for the engine: lines, words and arbitrary ranges of a
//! [`TextView`] become targets whose hints are drawn into the view itself.

mod targets;
mod view;

pub use targets::{line_targets, range_targets, select_words, word_ranges, word_targets, words_in_range, LineTarget, RangeTarget};
pub use view::{TextPosition, TextRange, TextView};
