//! Plain text view that hint labels are drawn into

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

use crate::jump::HintHandle;

/// Row and column of a character, both zero-based and counted in chars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    pub row: usize,
    pub column: usize,
}

impl TextPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.column + 1)
    }
}

/// Half-open range of characters within one row or across rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextRange {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A read-only text buffer plus the state a jump can change: live hint
/// overlays, the cursor and the selections
#[derive(Debug, Default)]
pub struct TextView {
    lines: Vec<String>,
    overlays: Mutex<IndexMap<TextPosition, HintHandle>>,
    cursor: Mutex<TextPosition>,
    selections: Mutex<Vec<TextRange>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TextView {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Whether `position` points into the buffer (end of line included)
    pub fn contains(&self, position: TextPosition) -> bool {
        self.line(position.row)
            .is_some_and(|line| position.column <= line.chars().count())
    }

    /// Range spanning the whole buffer
    pub fn full_range(&self) -> TextRange {
        TextRange::new(TextPosition::default(), TextPosition::new(self.lines.len(), 0))
    }

    /// Text covered by a single-row `range`
    pub fn text_in(&self, range: TextRange) -> Option<String> {
        if range.start.row != range.end.row {
            return None;
        }
        let line = self.line(range.start.row)?;
        Some(
            line.chars()
                .skip(range.start.column)
                .take(range.end.column.saturating_sub(range.start.column))
                .collect(),
        )
    }

    pub fn cursor(&self) -> TextPosition {
        *lock(&self.cursor)
    }

    pub fn set_cursor(&self, position: TextPosition) {
        log::debug!("Cursor moved to {}", position);
        *lock(&self.cursor) = position;
    }

    pub fn selections(&self) -> Vec<TextRange> {
        lock(&self.selections).clone()
    }

    pub fn set_selections(&self, ranges: Vec<TextRange>) {
        *lock(&self.selections) = ranges;
    }

    /// Draw `hint` at `position`
    ///
    /// Returns false when another hint already sits there.
    pub fn add_overlay(&self, position: TextPosition, hint: &HintHandle) -> bool {
        let mut overlays = lock(&self.overlays);
        if overlays.contains_key(&position) {
            return false;
        }
        overlays.insert(position, hint.clone());
        true
    }

    /// Remove the hint drawn at `position`, if any
    pub fn remove_overlay(&self, position: TextPosition) -> bool {
        lock(&self.overlays).shift_remove(&position).is_some()
    }

    /// Number of hints currently drawn
    pub fn overlay_count(&self) -> usize {
        lock(&self.overlays).len()
    }

    /// Render the buffer with every live hint drawn over the text
    ///
    /// Only the part of a label that still has to be typed is drawn, so the
    /// labels shrink as keys are pressed. Selected hints get a `*` marker.
    pub fn render(&self) -> String {
        let overlays = lock(&self.overlays);
        let mut rendered = Vec::with_capacity(self.lines.len());
        for (row, line) in self.lines.iter().enumerate() {
            let mut chars: Vec<char> = line.chars().collect();
            let mut labels: Vec<(usize, &HintHandle)> = overlays
                .iter()
                .filter(|(position, _)| position.row == row)
                .map(|(position, hint)| (position.column, hint))
                .collect();
            labels.sort_by_key(|(column, _)| *column);

            for (column, hint) in labels {
                let label = hint.snapshot();
                let mut text = label.remaining;
                if label.selected {
                    text.insert(0, '*');
                }
                for (offset, c) in text.chars().enumerate() {
                    let at = column + offset;
                    if at >= chars.len() {
                        chars.resize(at + 1, ' ');
                    }
                    chars[at] = c;
                }
            }
            rendered.push(chars.into_iter().collect::<String>());
        }
        rendered.join("\n")
    }
}
