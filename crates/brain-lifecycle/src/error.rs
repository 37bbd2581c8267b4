//! The lifecycle gates' error type (§4.5, §7 `LifecycleDenied`).

/// A rejected transition or delete request, carrying every unmet
/// precondition so the caller can surface them all at once.
#[derive(Debug, thiserror::Error)]
#[error("lifecycle denied: {}", .reasons.join("; "))]
pub struct GateError {
    pub reasons: Vec<String>,
}

impl GateError {
    pub fn single(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
        }
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
