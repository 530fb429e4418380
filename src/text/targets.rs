//! Jump targets over a [`TextView`]

use std::ops::Range;
use std::sync::{Arc, Mutex, OnceLock};

use regex::Regex;

use crate::error::TargetError;
use crate::jump::{HintHandle, Jumpable, Selectable, Target};

use super::view::{TextPosition, TextRange, TextView};

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

fn draw(view: &TextView, position: TextPosition, hint: &HintHandle) -> Result<(), TargetError> {
    if !view.contains(position) {
        return Err(format!("{} is outside the buffer", position).into());
    }
    if !view.add_overlay(position, hint) {
        return Err(format!("{} already carries a hint", position).into());
    }
    Ok(())
}

fn erase(view: &TextView, position: TextPosition) -> Result<(), TargetError> {
    // Nothing drawn is fine; show may have failed
    view.remove_overlay(position);
    Ok(())
}

/// Jump to the first non-blank character of a line
pub struct LineTarget {
    view: Arc<TextView>,
    position: TextPosition,
}

impl LineTarget {
    pub fn position(&self) -> TextPosition {
        self.position
    }
}

impl Target for LineTarget {
    fn show_hint(&self, hint: &HintHandle) -> Result<(), TargetError> {
        draw(&self.view, self.position, hint)
    }

    fn clear_hint(&self) -> Result<(), TargetError> {
        erase(&self.view, self.position)
    }
}

impl Jumpable for LineTarget {
    fn handler(&self) -> Result<(), TargetError> {
        self.view.set_cursor(self.position);
        Ok(())
    }
}

/// Targets for every non-blank line of `view`
pub fn line_targets(view: &Arc<TextView>) -> Vec<Arc<LineTarget>> {
    view.lines()
        .enumerate()
        .filter_map(|(row, line)| {
            let column = line.chars().position(|c| !c.is_whitespace())?;
            Some(Arc::new(LineTarget {
                view: Arc::clone(view),
                position: TextPosition::new(row, column),
            }))
        })
        .collect()
}

/// A range of text that can be jumped to or toggled into the selection
pub struct RangeTarget {
    view: Arc<TextView>,
    range: TextRange,
    hint: Mutex<Option<HintHandle>>,
}

impl RangeTarget {
    pub fn new(view: &Arc<TextView>, range: TextRange) -> Self {
        Self {
            view: Arc::clone(view),
            range,
            hint: Mutex::new(None),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// The text the range covers, for single-row ranges
    pub fn text(&self) -> Option<String> {
        self.view.text_in(self.range)
    }
}

impl Target for RangeTarget {
    fn show_hint(&self, hint: &HintHandle) -> Result<(), TargetError> {
        draw(&self.view, self.range.start, hint)?;
        *self.hint.lock().map_err(|e| e.to_string())? = Some(hint.clone());
        Ok(())
    }

    /// Erase the overlay but keep the handle; a toggle after the round
    /// still flips its selected mark
    fn clear_hint(&self) -> Result<(), TargetError> {
        erase(&self.view, self.range.start)
    }
}

impl Jumpable for RangeTarget {
    /// Move the cursor to the start of the range
    fn handler(&self) -> Result<(), TargetError> {
        self.view.set_cursor(self.range.start);
        Ok(())
    }
}

impl Selectable for RangeTarget {
    fn toggle_selection(&self) {
        let hint = self.hint.lock().ok().and_then(|hint| hint.clone());
        if let Some(hint) = hint {
            hint.toggle_selected();
        }
    }
}

/// Targets for the view's current selections
pub fn range_targets(view: &Arc<TextView>) -> Vec<Arc<RangeTarget>> {
    view.selections()
        .into_iter()
        .map(|range| Arc::new(RangeTarget::new(view, range)))
        .collect()
}

/// Ranges of every `\w+` run within `rows`, or the whole buffer
pub fn word_ranges(view: &TextView, rows: Option<Range<usize>>) -> Vec<TextRange> {
    let rows = rows.unwrap_or(0..view.line_count());
    let mut ranges = Vec::new();
    for row in rows {
        let Some(line) = view.line(row) else {
            break;
        };
        for m in word_regex().find_iter(line) {
            let start = line[..m.start()].chars().count();
            let end = start + m.as_str().chars().count();
            ranges.push(TextRange::new(TextPosition::new(row, start), TextPosition::new(row, end)));
        }
    }
    ranges
}

/// Targets for every word within `rows`, or the whole buffer
pub fn word_targets(view: &Arc<TextView>, rows: Option<Range<usize>>) -> Vec<Arc<RangeTarget>> {
    word_ranges(view, rows)
        .into_iter()
        .map(|range| Arc::new(RangeTarget::new(view, range)))
        .collect()
}

/// Ranges of every `\w+` run in the text covered by `scope`
///
/// The text is clipped to the scope first, so a word cut by either edge
/// yields its covered part.
pub fn words_in_range(view: &TextView, scope: TextRange) -> Vec<TextRange> {
    let mut ranges = Vec::new();
    for row in scope.start.row..=scope.end.row {
        let Some(line) = view.line(row) else {
            break;
        };
        let len = line.chars().count();
        let from = if row == scope.start.row { scope.start.column.min(len) } else { 0 };
        let to = if row == scope.end.row { scope.end.column.min(len) } else { len };
        if from >= to {
            continue;
        }
        let clipped: String = line.chars().skip(from).take(to - from).collect();
        for m in word_regex().find_iter(&clipped) {
            let start = from + clipped[..m.start()].chars().count();
            let end = start + m.as_str().chars().count();
            ranges.push(TextRange::new(TextPosition::new(row, start), TextPosition::new(row, end)));
        }
    }
    ranges
}

/// Replace the view's selections with the words they contain
///
/// A single empty selection (a bare cursor) widens to the whole buffer.
/// With no selection at all nothing changes. Returns the number of words
/// selected.
pub fn select_words(view: &TextView) -> usize {
    let selections = view.selections();
    if selections.is_empty() {
        return 0;
    }
    let scopes = match selections.as_slice() {
        [only] if only.is_empty() => vec![view.full_range()],
        _ => selections,
    };

    let words: Vec<TextRange> = scopes
        .iter()
        .flat_map(|scope| words_in_range(view, *scope))
        .collect();
    let count = words.len();
    view.set_selections(words);
    log::debug!("Selected {} words", count);
    count
}
