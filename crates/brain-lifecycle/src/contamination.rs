//! Contamination detection and the SSOT promotion gate (§4.5, invariant 5).

use brain_core::record::Record;
use brain_core::{RecordType, SourceType, Status};

use crate::error::{GateError, Result};

/// Scans the active records for contamination: an SSOT-typed record
/// (`rule` or `decision`) sourced from an inference or candidate. Does
/// not block writes -- the recommended remediation is to deprecate the
/// offenders.
pub fn scan<'a>(records: &'a [Record]) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| r.status == Status::Active && r.is_contaminated())
        .collect()
}

/// Promotion to `rule` or `decision` is allowed only when
/// `sourceType == user_confirmed`.
pub fn check_promotion(target_type: RecordType, source_type: SourceType) -> Result<()> {
    if target_type.is_ssot() && source_type != SourceType::UserConfirmed {
        Err(GateError::single(format!(
            "promotion to {target_type:?} requires sourceType=user_confirmed"
        )))
    } else {
        Ok(())
    }
}
