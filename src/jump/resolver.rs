//! Keystroke-at-a-time narrowing of the assignment trie
//!
//! The resolver owns the trie of one round and consumes it: every accepted
//! key replaces the current node with the matching child and reports the
//! targets of the dropped siblings so their hints can be cleared. It does
//! no I/O; the engine feeds it events and performs the clears.

use indexmap::IndexMap;

use crate::keyboard::{InputEvent, Key, KeyEvent, NamedKey};

use super::trie::HintNode;

/// Why a round ended without a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// A key was pressed with control, shift, option or command held
    Modifier,
    /// Escape was pressed
    Escape,
    /// The key typed after `pressed` has no hint at this position.
    /// `pressed` includes the offending key.
    UnmatchedKey { pressed: String },
    PointerPressed,
    Scroll,
    /// The input source closed
    InputClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveState {
    /// No key consumed yet
    Root,
    /// At least one key consumed, more needed
    Narrowed { pressed: String },
    /// Index of the chosen target
    Resolved(usize),
    Cancelled(CancelReason),
}

impl ResolveState {
    pub fn is_finished(&self) -> bool {
        matches!(self, ResolveState::Resolved(_) | ResolveState::Cancelled(_))
    }
}

/// What the engine must do after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Still waiting; clear the hints of `eliminated`
    Narrowed { eliminated: Vec<usize> },
    /// Target `index` was chosen; clear `eliminated`, then the winner
    Resolved { index: usize, eliminated: Vec<usize> },
    /// Round abandoned; clear every target still `standing`
    Cancelled { reason: CancelReason, standing: Vec<usize> },
    /// The round had already finished, nothing to do
    Ignored,
}

pub struct Resolver {
    node: HintNode,
    pressed: String,
    state: ResolveState,
    capitalize: bool,
}

impl Resolver {
    /// Start resolving over `root`
    ///
    /// `capitalize` only affects how the typed prefix is reported.
    pub fn new(root: HintNode, capitalize: bool) -> Self {
        Self {
            node: root,
            pressed: String::new(),
            state: ResolveState::Root,
            capitalize,
        }
    }

    pub fn state(&self) -> &ResolveState {
        &self.state
    }

    /// Keys consumed so far
    pub fn pressed(&self) -> &str {
        &self.pressed
    }

    /// Subtree of the targets still in play
    pub fn current(&self) -> &HintNode {
        &self.node
    }

    /// Process one event; `None` means the input source closed
    pub fn feed(&mut self, event: Option<InputEvent>) -> Step {
        if self.state.is_finished() {
            log::warn!("Jump resolver fed after finishing: {:?}", event);
            return Step::Ignored;
        }

        match event {
            None => self.cancel(CancelReason::InputClosed),
            Some(InputEvent::PointerPressed(_)) => self.cancel(CancelReason::PointerPressed),
            Some(InputEvent::Scroll) => self.cancel(CancelReason::Scroll),
            Some(InputEvent::Key(key_event)) => self.feed_key(key_event),
        }
    }

    fn feed_key(&mut self, event: KeyEvent) -> Step {
        // Modifier chords are reserved and never match a hint
        if event.modifiers.any() {
            return self.cancel(CancelReason::Modifier);
        }

        let c = match event.key {
            Key::Char(c) => c,
            Key::Named(NamedKey::Escape) => return self.cancel(CancelReason::Escape),
            Key::Named(named) => {
                let pressed = format!("{}{}", self.reported_prefix(), named.to_display_name());
                return self.cancel(CancelReason::UnmatchedKey { pressed });
            }
        };

        let child = match &mut self.node {
            HintNode::Branch(children) => children.shift_remove(&c),
            HintNode::Leaf(_) => None,
        };
        let Some(child) = child else {
            let pressed = format!("{}{}", self.reported_prefix(), self.report_char(c));
            return self.cancel(CancelReason::UnmatchedKey { pressed });
        };

        // Everything left beside the chosen child is now impossible
        let eliminated = self.take_node().leaf_indices();
        for leaf in child.leaves() {
            leaf.hint.advance();
        }
        self.pressed.push(c);

        match child {
            HintNode::Leaf(leaf) => {
                log::debug!("Jump: '{}' resolved to target {}", self.pressed, leaf.index);
                self.state = ResolveState::Resolved(leaf.index);
                Step::Resolved {
                    index: leaf.index,
                    eliminated,
                }
            }
            branch @ HintNode::Branch(_) => {
                log::debug!(
                    "Jump: '{}' narrowed to {} targets, {} eliminated",
                    self.pressed,
                    branch.leaf_count(),
                    eliminated.len()
                );
                self.node = branch;
                self.state = ResolveState::Narrowed {
                    pressed: self.pressed.clone(),
                };
                Step::Narrowed { eliminated }
            }
        }
    }

    fn cancel(&mut self, reason: CancelReason) -> Step {
        log::debug!("Jump cancelled: {:?}", reason);
        let standing = self.take_node().leaf_indices();
        self.state = ResolveState::Cancelled(reason.clone());
        Step::Cancelled { reason, standing }
    }

    fn take_node(&mut self) -> HintNode {
        std::mem::replace(&mut self.node, HintNode::Branch(IndexMap::new()))
    }

    fn reported_prefix(&self) -> String {
        if self.capitalize {
            self.pressed.to_uppercase()
        } else {
            self.pressed.clone()
        }
    }

    fn report_char(&self, c: char) -> String {
        if self.capitalize {
            c.to_uppercase().collect()
        } else {
            c.to_string()
        }
    }
}
