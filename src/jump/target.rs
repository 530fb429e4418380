//! Capabilities a jump target must provide
//!
//! Discovering targets and drawing their hints is the host's business.
//! The engine only guarantees that within one round every target sees
//! exactly one `show_hint` and, eventually, exactly one `clear_hint`.

use crate::error::TargetError;

use super::hint::HintHandle;

/// Something that can carry a hint label
pub trait Target: Send + Sync {
    /// Attach `hint` to this target. The handle is shared with the engine,
    /// which keeps updating the pressed/remaining split in place.
    fn show_hint(&self, hint: &HintHandle) -> Result<(), TargetError>;

    /// Remove the hint and anything `show_hint` created. Must be safe to
    /// call even if `show_hint` did not complete.
    fn clear_hint(&self) -> Result<(), TargetError>;
}

/// A target chosen once, then acted upon
pub trait Jumpable: Target {
    /// Perform the action this target stands for (click, focus, move cursor)
    fn handler(&self) -> Result<(), TargetError>;
}

/// A target that can be toggled in and out of a selection
pub trait Selectable: Target {
    /// Flip the target's own "selected" indicator. Purely visual; the
    /// engine tracks selection membership itself.
    fn toggle_selection(&self);
}
