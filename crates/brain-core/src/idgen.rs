//! Record ID minting (§4.1).
//!
//! `recordId` format: `rec_{scopeAbbrev}_{scopeId}_{YYYYMMDD}_{NNNN}`. The
//! counter is derived by scanning existing records for the longest shared
//! prefix and taking `max(suffix) + 1` -- there is no persisted counter,
//! mirroring the teacher's approach of deriving IDs from existing state
//! rather than maintaining a side sequence.

use chrono::{DateTime, Utc};

use crate::enums::ScopeType;
use crate::record::Record;

/// Builds the `rec_{abbrev}_{scopeId}_{YYYYMMDD}_` prefix shared by every
/// record minted for this scope on this day.
pub fn id_prefix(scope_type: ScopeType, scope_id: &str, today: DateTime<Utc>) -> String {
    format!(
        "rec_{}_{}_{}_",
        scope_type.abbrev(),
        scope_id,
        today.format("%Y%m%d")
    )
}

/// Mints the next `recordId` for `(scope_type, scope_id)` on `today`,
/// given the full set of existing records.
///
/// Scans `existing` for any ID sharing the day's prefix, takes the
/// maximum numeric suffix, and returns `prefix + (N+1):04`. The first
/// record of a scope-day is `0001`.
pub fn mint_record_id(
    scope_type: ScopeType,
    scope_id: &str,
    existing: &[Record],
    today: DateTime<Utc>,
) -> String {
    let prefix = id_prefix(scope_type, scope_id, today);
    let next = existing
        .iter()
        .filter_map(|r| r.record_id.strip_prefix(prefix.as_str()))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .map_or(1, |max| max + 1);
    format!("{prefix}{next:04}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordBuilder;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn first_record_of_scope_day_is_0001() {
        let today = day(2026, 7, 27);
        let id = mint_record_id(ScopeType::Topic, "v2-test", &[], today);
        assert_eq!(id, "rec_topic_v2-test_20260727_0001");
    }

    #[test]
    fn increments_from_existing_max() {
        let today = day(2026, 7, 27);
        let existing = vec![
            RecordBuilder::new_minimal()
                .record_id("rec_topic_v2-test_20260727_0001")
                .build(),
            RecordBuilder::new_minimal()
                .record_id("rec_topic_v2-test_20260727_0003")
                .build(),
        ];
        let id = mint_record_id(ScopeType::Topic, "v2-test", &existing, today);
        assert_eq!(id, "rec_topic_v2-test_20260727_0004");
    }

    #[test]
    fn ignores_other_scopes_and_days() {
        let today = day(2026, 7, 27);
        let existing = vec![
            RecordBuilder::new_minimal()
                .record_id("rec_topic_other-scope_20260727_0099")
                .build(),
            RecordBuilder::new_minimal()
                .record_id("rec_topic_v2-test_20260101_0050")
                .build(),
        ];
        let id = mint_record_id(ScopeType::Topic, "v2-test", &existing, today);
        assert_eq!(id, "rec_topic_v2-test_20260727_0001");
    }
}
