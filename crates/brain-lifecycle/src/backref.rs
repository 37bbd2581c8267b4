//! The back-reference detector (§4.5): flags active records that still
//! mention a deprecated record's id in their `sourceRef` or `summary`.

use brain_core::record::Record;
use brain_core::Status;

/// One flagged pair: an active record referencing a deprecated one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackReference {
    pub active_record_id: String,
    pub deprecated_record_id: String,
}

/// For every active record, looks for any deprecated record's id
/// appearing as a substring of the active record's `sourceRef` or
/// `summary`.
pub fn scan(records: &[Record]) -> Vec<BackReference> {
    let deprecated: Vec<&Record> = records.iter().filter(|r| r.status == Status::Deprecated).collect();
    let active: Vec<&Record> = records.iter().filter(|r| r.status == Status::Active).collect();

    let mut found = Vec::new();
    for a in &active {
        for d in &deprecated {
            if a.source_ref.contains(&d.record_id) || a.summary.contains(&d.record_id) {
                found.push(BackReference {
                    active_record_id: a.record_id.clone(),
                    deprecated_record_id: d.record_id.clone(),
                });
            }
        }
    }
    found
}
