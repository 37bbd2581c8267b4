//! The delete-gate (§4.5): a record may be physically removed only when
//! every one of four preconditions holds. Each unmet precondition is
//! reported individually so the caller can show them all at once.

use brain_core::record::Record;
use brain_core::Status;
use chrono::{DateTime, Utc};

use crate::error::{GateError, Result};

/// Checks the four delete preconditions against `record`. A deprecation
/// performed in the same session as the delete request is always
/// blocked, since `updatedAt` must be strictly earlier than
/// `current_session_start`.
pub fn check_delete(record: &Record, current_session_start: DateTime<Utc>, user_confirmed: bool) -> Result<()> {
    let mut reasons = Vec::new();

    if record.status != Status::Deprecated {
        reasons.push(format!("record {} is not deprecated", record.record_id));
    }
    if record.updated_at >= current_session_start {
        reasons.push(format!(
            "record {} was deprecated in the current session",
            record.record_id
        ));
    }
    if record.replaced_by.is_none() {
        reasons.push(format!("record {} has no replacedBy", record.record_id));
    }
    if !user_confirmed {
        reasons.push("delete requires explicit user confirmation".to_string());
    }

    if reasons.is_empty() {
        Ok(())
    } else {
        Err(GateError { reasons })
    }
}
