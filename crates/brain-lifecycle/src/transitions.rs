//! The lifecycle state-transition table (§3.4, §4.5).

use brain_core::Status;

use crate::error::{GateError, Result};

/// `true` iff `from -> to` is one of the three allowed transitions:
/// `active->deprecated`, `active->archived`, `deprecated->active`.
pub fn is_allowed(from: Status, to: Status) -> bool {
    matches!(
        (from, to),
        (Status::Active, Status::Deprecated) | (Status::Active, Status::Archived) | (Status::Deprecated, Status::Active)
    )
}

/// Validates a transition, returning a [`GateError`] naming the reason
/// when it is not allowed.
pub fn check_transition(from: Status, to: Status) -> Result<()> {
    if is_allowed(from, to) {
        Ok(())
    } else {
        Err(GateError::single(format!("transition {from:?} -> {to:?} is not allowed")))
    }
}
