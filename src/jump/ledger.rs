//! Hint lifecycle bookkeeping
//!
//! One slot per target of the active round. A slot moves
//! `Pending -> Shown -> Cleared` and never back, which is what keeps
//! `show_hint`/`clear_hint` at exactly once per target per round even when
//! a forced `clear_all` races with the round's own cleanup.

use std::sync::Arc;

use crate::error::JumpError;

use super::hint::HintHandle;
use super::target::Target;

/// Identifies one round in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Shown,
    /// `forced` is set when the hint was removed by `clear_all`
    Cleared { forced: bool },
}

struct Slot {
    target: Arc<dyn Target>,
    hint: HintHandle,
    state: SlotState,
}

impl Slot {
    fn clear(&mut self, forced: bool) -> Result<(), JumpError> {
        // Marked first so a failing target is never cleared twice
        self.state = SlotState::Cleared { forced };
        self.target.clear_hint().map_err(|source| JumpError::ClearHint {
            hint: self.hint.text(),
            source,
        })
    }
}

struct ActiveRound {
    id: RoundId,
    slots: Vec<Slot>,
}

/// Tracks the hints of the round in progress
#[derive(Default)]
pub struct HintLedger {
    next_id: u64,
    active: Option<ActiveRound>,
}

impl HintLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Open a round with one slot per `(target, hint)` pair, indexed by
    /// target position.
    pub fn begin(&mut self, slots: Vec<(Arc<dyn Target>, HintHandle)>) -> Result<RoundId, JumpError> {
        if self.active.is_some() {
            return Err(JumpError::RoundInProgress);
        }
        let id = RoundId(self.next_id);
        self.next_id += 1;
        self.active = Some(ActiveRound {
            id,
            slots: slots
                .into_iter()
                .map(|(target, hint)| Slot {
                    target,
                    hint,
                    state: SlotState::Pending,
                })
                .collect(),
        });
        Ok(id)
    }

    fn slot_mut(&mut self, round: RoundId, index: usize) -> Option<&mut Slot> {
        self.active
            .as_mut()
            .filter(|active| active.id == round)
            .and_then(|active| active.slots.get_mut(index))
    }

    pub fn state(&self, round: RoundId, index: usize) -> Option<SlotState> {
        self.active
            .as_ref()
            .filter(|active| active.id == round)
            .and_then(|active| active.slots.get(index))
            .map(|slot| slot.state)
    }

    /// Attach the hint of slot `index` to its target
    pub fn show(&mut self, round: RoundId, index: usize) -> Result<(), JumpError> {
        let Some(slot) = self.slot_mut(round, index) else {
            return Ok(());
        };
        if slot.state != SlotState::Pending {
            debug_assert!(false, "hint {} shown twice in one round", index);
            log::error!("Hint {} shown twice in one round", index);
            return Ok(());
        }
        slot.hint.reset();
        slot.state = SlotState::Shown;
        slot.target
            .show_hint(&slot.hint)
            .map_err(|source| JumpError::ShowHint {
                hint: slot.hint.text(),
                source,
            })
    }

    /// Detach the hint of slot `index`
    ///
    /// Returns false when the slot was already cleared by `clear_all`.
    pub fn clear(&mut self, round: RoundId, index: usize) -> Result<bool, JumpError> {
        let Some(slot) = self.slot_mut(round, index) else {
            return Ok(false);
        };
        match slot.state {
            SlotState::Cleared { forced: true } => Ok(false),
            SlotState::Cleared { forced: false } => {
                debug_assert!(false, "hint {} cleared twice in one round", index);
                log::error!("Hint {} cleared twice in one round", index);
                Ok(false)
            }
            SlotState::Pending | SlotState::Shown => slot.clear(false).map(|_| true),
        }
    }

    /// Clear every slot of `round` that is still standing
    ///
    /// Every slot is attempted; the first failure is returned after the
    /// sweep completes.
    pub fn sweep(&mut self, round: RoundId) -> Result<usize, JumpError> {
        let Some(active) = self.active.as_mut().filter(|active| active.id == round) else {
            return Ok(0);
        };
        clear_standing(&mut active.slots, false)
    }

    /// Close `round`, dropping its slots
    pub fn finish(&mut self, round: RoundId) {
        if !self.active.as_ref().is_some_and(|active| active.id == round) {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };
        let leaked = active
            .slots
            .iter()
            .filter(|slot| !matches!(slot.state, SlotState::Cleared { .. }))
            .count();
        debug_assert_eq!(leaked, 0, "round finished with live hints");
        if leaked > 0 {
            log::error!("Jump round finished with {} live hints", leaked);
        }
    }

    /// Forcibly clear every live hint of the active round
    pub fn clear_all(&mut self) -> Result<usize, JumpError> {
        match self.active.as_mut() {
            Some(active) => clear_standing(&mut active.slots, true),
            None => Ok(0),
        }
    }
}

fn clear_standing(slots: &mut [Slot], forced: bool) -> Result<usize, JumpError> {
    let mut cleared = 0;
    let mut first_error = None;
    for slot in slots
        .iter_mut()
        .filter(|slot| !matches!(slot.state, SlotState::Cleared { .. }))
    {
        cleared += 1;
        if let Err(e) = slot.clear(forced) {
            log::error!("{}", e);
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(cleared),
    }
}
