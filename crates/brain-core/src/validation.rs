//! Pure, file-system-free record validation (§3.1, §3.3, §4.4 checks 1-3).
//!
//! These checks run identically whether the caller is validating an
//! intent before step 1 of the BWT (§4.3), re-validating staged records
//! at step 9, or running a standalone `validate` pass (§4.4) -- the I/O
//! half of validation (file existence, hash matching, residue scanning)
//! lives in `brain-storage`, which calls into this module for the
//! per-record rules.

use std::collections::HashSet;

use crate::enums::Status;
use crate::record::Record;
use crate::tags::all_tags_valid;

/// A single, specifically-worded validation failure (§4.4: "all reported
/// with specific messages").
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The record this failure concerns, if any.
    pub record_id: Option<String>,
    pub message: String,
}

impl ValidationError {
    fn on(record_id: &str, message: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.to_string()),
            message: message.into(),
        }
    }
}

/// Growth-signal threshold (§4.4 check 3): beyond this many records, a
/// warning (not an error) is surfaced.
pub const GROWTH_WARNING_THRESHOLD: usize = 100;

/// `scopeId` grammar (§3.1 parenthetical, SPEC_FULL §3.5): lowercase
/// ASCII alphanumerics, `_`, `-`, 1-64 characters.
pub fn is_valid_scope_id(scope_id: &str) -> bool {
    !scope_id.is_empty()
        && scope_id.len() <= 64
        && scope_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// Validates the per-field rules and invariants 1, 4, 6 of §3.3 against a
/// single record (everything that does not require touching the
/// filesystem). Invariant 1 (`recordId` uniqueness) is checked across the
/// whole sequence by [`validate_unique_ids`], not here.
pub fn validate_record(record: &Record) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if record.record_id.is_empty() {
        errors.push(ValidationError {
            record_id: None,
            message: "recordId must not be empty".into(),
        });
    }

    if !is_valid_scope_id(&record.scope_id) {
        errors.push(ValidationError::on(
            &record.record_id,
            format!("scopeId '{}' is not a valid slug", record.scope_id),
        ));
    }

    if record.title.is_empty() {
        errors.push(ValidationError::on(&record.record_id, "title must not be empty"));
    }

    if !all_tags_valid(&record.tags) {
        errors.push(ValidationError::on(
            &record.record_id,
            "tags must be axis/value with axis in {domain, intent}",
        ));
    }

    // Invariant 4: status=deprecated => replacedBy != null; replacedBy ==
    // "obsolete" => deprecationReason non-empty.
    match (record.status, &record.replaced_by) {
        (Status::Deprecated, None) => {
            errors.push(ValidationError::on(
                &record.record_id,
                "deprecated record must have a non-null replacedBy",
            ));
        }
        (Status::Deprecated, Some(rb)) if rb.is_obsolete() => {
            let reason_ok = record
                .deprecation_reason
                .as_deref()
                .is_some_and(|r| !r.is_empty());
            if !reason_ok {
                errors.push(ValidationError::on(
                    &record.record_id,
                    "replacedBy='obsolete' requires a non-empty deprecationReason",
                ));
            }
        }
        _ => {}
    }

    // Invariant 5 (contamination) is advisory, not a hard validation
    // error -- see brain-lifecycle's contamination detector.

    errors
}

/// Invariant 1: every `recordId` in the sequence is pairwise distinct.
/// Returns the duplicated IDs (each reported once).
pub fn validate_unique_ids(records: &[Record]) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut duplicates = HashSet::new();
    for r in records {
        if !seen.insert(r.record_id.clone()) {
            duplicates.insert(r.record_id.clone());
        }
    }
    duplicates
        .into_iter()
        .map(|id| ValidationError::on(&id, format!("duplicate recordId: {id}")))
        .collect()
}

/// Validates every record plus sequence-wide invariant 1. This is the
/// entry point both the BWT engine (step 1 and step 9) and the
/// standalone validator call.
pub fn validate_records(records: &[Record]) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = records.iter().flat_map(validate_record).collect();
    errors.extend(validate_unique_ids(records));
    errors
}

/// §4.4 check 3: a growth-signal warning, not an error, once the record
/// count exceeds [`GROWTH_WARNING_THRESHOLD`].
pub fn growth_warning(record_count: usize) -> Option<String> {
    (record_count > GROWTH_WARNING_THRESHOLD).then(|| {
        format!(
            "record count {record_count} exceeds {GROWTH_WARNING_THRESHOLD}; consider archiving or compacting"
        )
    })
}
