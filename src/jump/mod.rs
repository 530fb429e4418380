//! Jump - keyboard-driven target selection
//!
//! Each target gets a fixed-length key sequence shown as a hint label.
//! Typing narrows the candidates one key at a time until a single target
//! remains or the user gives up (mouse press, scroll, modifier chord,
//! Escape, or a key no hint uses).

pub mod hint;
pub mod ledger;
pub mod resolver;
pub mod sequence;
pub mod target;
pub mod trie;

#[cfg(test)]
mod testing;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexSet;

use crate::config::{Settings, UnmatchedKeyPolicy};
use crate::error::JumpError;
use crate::keyboard::InputSource;

pub use hint::{HintHandle, HintLabel};
pub use ledger::{HintLedger, RoundId};
pub use resolver::{CancelReason, ResolveState, Resolver, Step};
pub use sequence::{generate_key_sequences, DEFAULT_HINT_KEYS};
pub use target::{Jumpable, Selectable, Target};
pub use trie::{render_hint_text, HintNode, Leaf};

/// Initial contents of the selection in toggled mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Seed {
    /// Start with nothing selected
    #[default]
    None,
    /// Start with every target selected
    All,
    /// Start with the targets at these positions selected
    Targets(Vec<usize>),
}

/// How a single round ended
#[derive(Debug, Clone, PartialEq, Eq)]
enum RoundOutcome {
    Resolved(usize),
    Cancelled(CancelReason),
}

/// Thread-safe handle to the hint ledger
pub type SharedHintLedger = Arc<Mutex<HintLedger>>;

/// Runs jump rounds over caller-supplied targets
///
/// Rounds must not overlap; starting one while another is pending fails
/// with [`JumpError::RoundInProgress`]. [`clear_all`](Self::clear_all) may
/// be called at any time, including while a round waits for input.
pub struct JumpEngine {
    hint_keys: Vec<char>,
    capitalize: bool,
    unmatched_key: UnmatchedKeyPolicy,
    ledger: SharedHintLedger,
}

impl JumpEngine {
    pub fn new(settings: &Settings) -> Result<Self, JumpError> {
        Ok(Self {
            hint_keys: settings.hint_keys()?,
            capitalize: settings.capitalize_hint,
            unmatched_key: settings.unmatched_key,
            ledger: Arc::new(Mutex::new(HintLedger::new())),
        })
    }

    pub fn hint_keys(&self) -> &[char] {
        &self.hint_keys
    }

    /// Check if a round is in progress
    pub fn is_active(&self) -> bool {
        self.lock_ledger().is_active()
    }

    /// Forcibly clear every live hint, returning how many were cleared
    pub fn clear_all(&self) -> Result<usize, JumpError> {
        let cleared = self.lock_ledger().clear_all()?;
        if cleared > 0 {
            log::warn!("Force-cleared {} live hints", cleared);
        }
        Ok(cleared)
    }

    /// Let the user pick one target
    ///
    /// Returns `Ok(None)` when the round was cancelled. With the `report`
    /// policy an unmatched key surfaces as
    /// [`JumpError::UnrecognizedKey`] instead.
    pub async fn resolve_one<T, I>(
        &self,
        targets: &[Arc<T>],
        input: &mut I,
    ) -> Result<Option<Arc<T>>, JumpError>
    where
        T: Target + 'static,
        I: InputSource + ?Sized,
    {
        if targets.is_empty() {
            return Err(JumpError::EmptyTargetSet);
        }

        match self.run_round(targets, &IndexSet::new(), input).await? {
            RoundOutcome::Resolved(index) => Ok(Some(Arc::clone(&targets[index]))),
            RoundOutcome::Cancelled(reason) => {
                self.check_unmatched(reason)?;
                Ok(None)
            }
        }
    }

    /// Let the user pick one target and run its handler
    pub async fn jump<T, I>(&self, targets: &[Arc<T>], input: &mut I) -> Result<Option<Arc<T>>, JumpError>
    where
        T: Jumpable + 'static,
        I: InputSource + ?Sized,
    {
        let Some(target) = self.resolve_one(targets, input).await? else {
            return Ok(None);
        };
        target.handler().map_err(JumpError::Action)?;
        Ok(Some(target))
    }

    /// Let the user toggle targets in and out of a selection
    ///
    /// Rounds repeat until one is cancelled; the selection at that point is
    /// returned, in the order targets entered it. Under the `report` policy
    /// an unmatched key fails with [`JumpError::UnrecognizedKey`] here too.
    pub async fn resolve_toggled<T, I>(
        &self,
        targets: &[Arc<T>],
        seed: Seed,
        input: &mut I,
    ) -> Result<Vec<Arc<T>>, JumpError>
    where
        T: Selectable + 'static,
        I: InputSource + ?Sized,
    {
        if targets.is_empty() {
            return Err(JumpError::EmptyTargetSet);
        }

        let mut selected: IndexSet<usize> = match seed {
            Seed::None => IndexSet::new(),
            Seed::All => (0..targets.len()).collect(),
            Seed::Targets(indices) => indices.into_iter().filter(|&i| i < targets.len()).collect(),
        };

        loop {
            match self.run_round(targets, &selected, input).await? {
                RoundOutcome::Resolved(index) => {
                    targets[index].toggle_selection();
                    if !selected.shift_remove(&index) {
                        selected.insert(index);
                    }
                    log::debug!("Jump: toggled target {}, {} selected", index, selected.len());
                }
                RoundOutcome::Cancelled(reason) => {
                    log::debug!("Jump: selection finished ({:?})", reason);
                    self.check_unmatched(reason)?;
                    break;
                }
            }
        }

        Ok(selected.iter().map(|&i| Arc::clone(&targets[i])).collect())
    }

    /// Turn an unmatched key into an error when the policy asks for it
    fn check_unmatched(&self, reason: CancelReason) -> Result<(), JumpError> {
        match reason {
            CancelReason::UnmatchedKey { pressed } if self.unmatched_key == UnmatchedKeyPolicy::Report => {
                Err(JumpError::UnrecognizedKey { pressed })
            }
            _ => Ok(()),
        }
    }

    /// One full round: show hints, resolve, and clear every hint
    async fn run_round<T, I>(
        &self,
        targets: &[Arc<T>],
        selected: &IndexSet<usize>,
        input: &mut I,
    ) -> Result<RoundOutcome, JumpError>
    where
        T: Target + 'static,
        I: InputSource + ?Sized,
    {
        let sequences = generate_key_sequences(targets.len(), &self.hint_keys)?;

        let mut hints = Vec::with_capacity(targets.len());
        let trie = HintNode::build(&sequences, |seq| {
            let hint = HintHandle::new(render_hint_text(seq, self.capitalize));
            hints.push(hint.clone());
            hint
        });
        for (index, hint) in hints.iter().enumerate() {
            hint.set_selected(selected.contains(&index));
        }

        let slots = targets
            .iter()
            .zip(&hints)
            .map(|(target, hint)| {
                let target: Arc<dyn Target> = Arc::clone(target) as Arc<dyn Target>;
                (target, hint.clone())
            })
            .collect();
        let round = self.lock_ledger().begin(slots)?;
        log::info!(
            "Jump round started: {} targets, {}-key hints",
            targets.len(),
            sequences.first().map_or(0, Vec::len)
        );

        let result = self.drive(round, trie, input).await;

        // Whatever happened, no hint of this round may outlive it
        let swept = self.lock_ledger().sweep(round);
        self.lock_ledger().finish(round);

        match &result {
            Ok(RoundOutcome::Resolved(index)) => log::info!("Jump round resolved to target {}", index),
            Ok(RoundOutcome::Cancelled(reason)) => log::info!("Jump round cancelled: {:?}", reason),
            Err(e) => log::error!("Jump round failed: {}", e),
        }

        let outcome = result?;
        swept?;
        Ok(outcome)
    }

    async fn drive<I>(&self, round: RoundId, trie: HintNode, input: &mut I) -> Result<RoundOutcome, JumpError>
    where
        I: InputSource + ?Sized,
    {
        for leaf in trie.leaves() {
            self.lock_ledger().show(round, leaf.index)?;
        }

        let mut resolver = Resolver::new(trie, self.capitalize);
        loop {
            let event = input.next_event().await;
            match resolver.feed(event) {
                Step::Narrowed { eliminated } => self.clear_hints(round, &eliminated)?,
                Step::Resolved { index, eliminated } => {
                    self.clear_hints(round, &eliminated)?;
                    self.clear_hints(round, &[index])?;
                    return Ok(RoundOutcome::Resolved(index));
                }
                Step::Cancelled { reason, standing } => {
                    self.clear_hints(round, &standing)?;
                    return Ok(RoundOutcome::Cancelled(reason));
                }
                Step::Ignored => return Ok(RoundOutcome::Cancelled(CancelReason::InputClosed)),
            }
        }
    }

    fn clear_hints(&self, round: RoundId, indices: &[usize]) -> Result<(), JumpError> {
        let mut ledger = self.lock_ledger();
        for &index in indices {
            ledger.clear(round, index)?;
        }
        Ok(())
    }

    fn lock_ledger(&self) -> MutexGuard<'_, HintLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
