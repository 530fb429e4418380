//! Recording targets for engine tests

use std::sync::{Arc, Mutex};

use crate::error::TargetError;

use super::hint::HintHandle;
use super::target::{Jumpable, Selectable, Target};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Show(usize, String),
    Clear(usize),
    Handler(usize),
    Toggle(usize),
}

/// Shared log of every call made on recording targets
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear_count(&self, id: usize) -> usize {
        self.count(&Call::Clear(id))
    }

    pub fn show_count(&self, id: usize) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Show(i, _) if *i == id))
            .count()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    /// Ids cleared so far, in call order
    pub fn cleared(&self) -> Vec<usize> {
        self.calls()
            .iter()
            .filter_map(|c| match c {
                Call::Clear(i) => Some(*i),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct RecordingTarget {
    pub id: usize,
    journal: Journal,
    hint: Mutex<Option<HintHandle>>,
    fail_show: bool,
    fail_clear: bool,
}

impl RecordingTarget {
    pub fn new(id: usize, journal: &Journal) -> Self {
        Self {
            id,
            journal: journal.clone(),
            hint: Mutex::new(None),
            fail_show: false,
            fail_clear: false,
        }
    }

    pub fn failing_show(mut self) -> Self {
        self.fail_show = true;
        self
    }

    pub fn failing_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    /// The hint handed over by the last `show_hint`
    pub fn hint(&self) -> Option<HintHandle> {
        self.hint.lock().unwrap().clone()
    }
}

impl Target for RecordingTarget {
    fn show_hint(&self, hint: &HintHandle) -> Result<(), TargetError> {
        self.journal.push(Call::Show(self.id, hint.text()));
        if self.fail_show {
            return Err(format!("target {} is gone", self.id).into());
        }
        *self.hint.lock().unwrap() = Some(hint.clone());
        Ok(())
    }

    fn clear_hint(&self) -> Result<(), TargetError> {
        self.journal.push(Call::Clear(self.id));
        if self.fail_clear {
            return Err(format!("target {} refused to clear", self.id).into());
        }
        Ok(())
    }
}

impl Jumpable for RecordingTarget {
    fn handler(&self) -> Result<(), TargetError> {
        self.journal.push(Call::Handler(self.id));
        Ok(())
    }
}

impl Selectable for RecordingTarget {
    fn toggle_selection(&self) {
        self.journal.push(Call::Toggle(self.id));
    }
}

/// `count` recording targets sharing one journal
pub fn targets(count: usize) -> (Journal, Vec<Arc<RecordingTarget>>) {
    let journal = Journal::default();
    let targets = (0..count)
        .map(|i| Arc::new(RecordingTarget::new(i, &journal)))
        .collect();
    (journal, targets)
}
