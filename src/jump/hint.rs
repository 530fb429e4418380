//! Hint label presentation
//!
//! A hint is rendered as two segments: the keys already typed and the
//! keys still to type. The engine owns the lifecycle of each label and
//! shifts one character from `remaining` to `pressed` per accepted key.
//! Targets receive a cheap clone of the handle in `show_hint` and read it
//! whenever they draw.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// Snapshot of a hint label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HintLabel {
    /// Keys consumed so far in this round
    pub pressed: String,
    /// Keys still to be typed
    pub remaining: String,
    /// Target is part of the running selection (toggled mode)
    pub selected: bool,
}

impl HintLabel {
    /// Full label text, regardless of progress
    pub fn text(&self) -> String {
        format!("{}{}", self.pressed, self.remaining)
    }
}

/// Shared handle to a mutable hint label
#[derive(Debug, Clone)]
pub struct HintHandle {
    label: Arc<Mutex<HintLabel>>,
}

impl HintHandle {
    /// Create an unpressed hint showing `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: Arc::new(Mutex::new(HintLabel {
                pressed: String::new(),
                remaining: text.into(),
                selected: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HintLabel> {
        self.label.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> HintLabel {
        self.lock().clone()
    }

    pub fn text(&self) -> String {
        self.lock().text()
    }

    pub fn pressed(&self) -> String {
        self.lock().pressed.clone()
    }

    pub fn remaining(&self) -> String {
        self.lock().remaining.clone()
    }

    /// Move one character from `remaining` to `pressed`
    ///
    /// Returns false when nothing is left to move.
    pub fn advance(&self) -> bool {
        let mut label = self.lock();
        let mut chars = label.remaining.chars();
        match chars.next() {
            Some(c) => {
                let rest = chars.as_str().to_string();
                label.pressed.push(c);
                label.remaining = rest;
                true
            }
            None => false,
        }
    }

    /// Put every pressed character back in front of `remaining`
    pub fn reset(&self) {
        let mut label = self.lock();
        if label.pressed.is_empty() {
            return;
        }
        let pressed = std::mem::take(&mut label.pressed);
        label.remaining.insert_str(0, &pressed);
    }

    pub fn set_selected(&self, selected: bool) {
        self.lock().selected = selected;
    }

    /// Flip the selected marker, returning the new value
    pub fn toggle_selected(&self) -> bool {
        let mut label = self.lock();
        label.selected = !label.selected;
        label.selected
    }

    pub fn is_selected(&self) -> bool {
        self.lock().selected
    }

    /// Whether both handles point at the same label
    pub fn ptr_eq(&self, other: &HintHandle) -> bool {
        Arc::ptr_eq(&self.label, &other.label)
    }
}

impl fmt::Display for HintHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.lock();
        if label.pressed.is_empty() {
            write!(f, "{}", label.remaining)
        } else {
            write!(f, "[{}]{}", label.pressed, label.remaining)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_reset() {
        let hint = HintHandle::new("fjd");
        assert_eq!(hint.pressed(), "");
        assert_eq!(hint.remaining(), "fjd");

        assert!(hint.advance());
        assert_eq!(hint.pressed(), "f");
        assert_eq!(hint.remaining(), "jd");

        assert!(hint.advance());
        assert!(hint.advance());
        assert!(!hint.advance());
        assert_eq!(hint.pressed(), "fjd");
        assert_eq!(hint.remaining(), "");

        hint.reset();
        assert_eq!(hint.pressed(), "");
        assert_eq!(hint.remaining(), "fjd");
        assert_eq!(hint.text(), "fjd");
    }

    #[test]
    fn test_advance_multibyte() {
        let hint = HintHandle::new("é;");
        assert!(hint.advance());
        assert_eq!(hint.pressed(), "é");
        assert_eq!(hint.remaining(), ";");
    }

    #[test]
    fn test_clones_share_state() {
        let hint = HintHandle::new("ab");
        let seen_by_target = hint.clone();
        hint.advance();
        hint.set_selected(true);

        assert!(seen_by_target.ptr_eq(&hint));
        assert_eq!(
            seen_by_target.snapshot(),
            HintLabel {
                pressed: "a".to_string(),
                remaining: "b".to_string(),
                selected: true,
            }
        );
        assert!(!seen_by_target.toggle_selected());
        assert!(!hint.is_selected());
    }

    #[test]
    fn test_display() {
        let hint = HintHandle::new("XY");
        assert_eq!(hint.to_string(), "XY");
        hint.advance();
        assert_eq!(hint.to_string(), "[X]Y");
    }
}
