//! The unified error type for the BWT engine, initializer, boot loader,
//! and validator (§7).

use std::path::PathBuf;

use brain_core::validation::ValidationError;

/// Every error kind the storage crate can surface.
#[derive(Debug, thiserror::Error)]
pub enum BrainError {
    /// Step 1: the intent's shape or field values are invalid.
    #[error("intent invalid: {violations:?}")]
    IntentInvalid { violations: Vec<String> },

    /// Step 2: a prior transaction left `.tmp` residue behind.
    #[error("residue present, prior transaction did not finish: {paths:?}")]
    Residue { paths: Vec<PathBuf> },

    /// Step 4: folder auto-create attempted outside `30_topics/`.
    #[error("scope violation: {message}")]
    ScopeViolation { message: String },

    /// An update/deprecate/delete intent named an unknown `recordId`.
    #[error("record not found: {record_id}")]
    NotFound { record_id: String },

    /// Step 9: a staged record failed schema or invariant validation.
    #[error("schema violation: {errors:?}")]
    SchemaViolation { errors: Vec<ValidationError> },

    /// Any underlying filesystem failure during backup, write, or rename.
    #[error("I/O fault: {0}")]
    IoFault(#[from] std::io::Error),

    /// Boot or validate detected drift between the manifest and disk.
    /// Never fatal -- carried in reports, not normally returned as `Err`.
    #[error("drift detected: {message}")]
    DriftWarning { message: String },

    /// A lifecycle transition or delete-gate precondition failed. Raised
    /// by `brain-lifecycle`'s gates, not by the engine itself.
    #[error("lifecycle denied: {reason}")]
    LifecycleDenied { reason: String },
}

pub type Result<T> = std::result::Result<T, BrainError>;

impl BrainError {
    pub fn not_found(record_id: impl Into<String>) -> Self {
        Self::NotFound {
            record_id: record_id.into(),
        }
    }

    pub fn scope_violation(message: impl Into<String>) -> Self {
        Self::ScopeViolation {
            message: message.into(),
        }
    }

    /// `true` for [`BrainError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// `true` if rollback should run on propagation -- every kind raised
    /// inside steps 1-9 or commit (§7 propagation policy), excluding the
    /// two informational kinds that never cause a BWT to abort.
    pub fn triggers_rollback(&self) -> bool {
        !matches!(self, Self::DriftWarning { .. } | Self::LifecycleDenied { .. })
    }

    /// The per-field reason strings this error carries, if any, for
    /// inclusion in a [`crate::bwt::BwtReport`]'s `errors` vector.
    pub fn reasons(&self) -> Vec<String> {
        match self {
            Self::IntentInvalid { violations } => violations.clone(),
            Self::SchemaViolation { errors } => errors.iter().map(|e| e.to_string()).collect(),
            Self::Residue { paths } => paths.iter().map(|p| p.display().to_string()).collect(),
            other => vec![other.to_string()],
        }
    }
}
