//! [`Record`] -- the central domain model for the brain index (§3.1).
//!
//! All fourteen fields are mandatory; nullable fields (`replacedBy`,
//! `deprecationReason`) are always emitted, as an explicit JSON `null`
//! when absent, never omitted -- unlike the teacher's `Issue`, which skips
//! empty optional fields to keep its JSONL compact. The brain schema has
//! no such compactness goal and invariant 4 depends on `replacedBy` being
//! observably present-or-null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{RecordType, ReplacedBy, ScopeType, SourceType, Status};
use crate::hash::ContentHash;

/// A single tracked document in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub record_id: String,
    pub scope_type: ScopeType,
    pub scope_id: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub source_type: SourceType,
    pub source_ref: String,
    pub status: Status,
    pub replaced_by: Option<ReplacedBy>,
    pub deprecation_reason: Option<String>,
    #[serde(with = "crate::time_fmt::millis_rfc3339")]
    pub updated_at: DateTime<Utc>,
    pub content_hash: ContentHash,
}

impl Record {
    /// `true` if this is a `rule` or `decision` record (§3.1, §4.5).
    pub fn is_ssot_type(&self) -> bool {
        self.record_type.is_ssot()
    }

    /// `true` if this record is SSOT-typed but sourced from an
    /// inference or candidate -- contamination (§3.3 invariant 5, §4.5).
    pub fn is_contaminated(&self) -> bool {
        self.is_ssot_type() && self.source_type.is_contaminating()
    }
}

/// Builder for constructing a [`Record`] with a fluent API, mirroring the
/// teacher's `IssueBuilder`.
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Starts a builder with every mandatory field defaulted to an empty
    /// or zero value. Intended for tests; real construction goes through
    /// the BWT engine, which fills in every field explicitly.
    pub fn new_minimal() -> Self {
        Self {
            record: Record {
                record_id: String::new(),
                scope_type: ScopeType::Topic,
                scope_id: String::new(),
                record_type: RecordType::Note,
                title: String::new(),
                summary: String::new(),
                tags: Vec::new(),
                source_type: SourceType::Candidate,
                source_ref: String::new(),
                status: Status::Active,
                replaced_by: None,
                deprecation_reason: None,
                updated_at: DateTime::<Utc>::MIN_UTC,
                content_hash: ContentHash::of_str(""),
            },
        }
    }

    pub fn record_id(mut self, id: impl Into<String>) -> Self {
        self.record.record_id = id.into();
        self
    }

    pub fn scope_type(mut self, scope_type: ScopeType) -> Self {
        self.record.scope_type = scope_type;
        self
    }

    pub fn scope_id(mut self, scope_id: impl Into<String>) -> Self {
        self.record.scope_id = scope_id.into();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record.record_type = record_type;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.record.summary = summary.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.record.tags = tags;
        self
    }

    pub fn source_type(mut self, source_type: SourceType) -> Self {
        self.record.source_type = source_type;
        self
    }

    pub fn source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.record.source_ref = source_ref.into();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.record.status = status;
        self
    }

    pub fn replaced_by(mut self, replaced_by: Option<crate::enums::ReplacedBy>) -> Self {
        self.record.replaced_by = replaced_by;
        self
    }

    pub fn deprecation_reason(mut self, reason: Option<String>) -> Self {
        self.record.deprecation_reason = reason;
        self
    }

    pub fn updated_at(mut self, t: DateTime<Utc>) -> Self {
        self.record.updated_at = t;
        self
    }

    pub fn content_hash(mut self, hash: ContentHash) -> Self {
        self.record.content_hash = hash;
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contamination_detection() {
        let r = RecordBuilder::new_minimal()
            .record_type(RecordType::Rule)
            .source_type(SourceType::Inference)
            .build();
        assert!(r.is_contaminated());

        let clean = RecordBuilder::new_minimal()
            .record_type(RecordType::Rule)
            .source_type(SourceType::UserConfirmed)
            .build();
        assert!(!clean.is_contaminated());
    }

    #[test]
    fn replaced_by_serializes_as_explicit_null() {
        let r = RecordBuilder::new_minimal().build();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["replacedBy"], serde_json::Value::Null);
        assert_eq!(json["deprecationReason"], serde_json::Value::Null);
    }

    #[test]
    fn timestamp_round_trips_at_millisecond_precision() {
        let mut r = RecordBuilder::new_minimal().build();
        r.updated_at = DateTime::parse_from_rfc3339("2026-07-27T12:34:56.789Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = serde_json::to_string(&r).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.updated_at, r.updated_at);
        assert!(json.contains("2026-07-27T12:34:56.789"));
    }

    #[test]
    fn record_field_names_are_camel_case() {
        let r = RecordBuilder::new_minimal()
            .record_id("rec_topic_x_20260727_0001")
            .build();
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("recordId").is_some());
        assert!(json.get("scopeType").is_some());
        assert!(json.get("sourceRef").is_some());
        assert!(json.get("type").is_some());
    }
}
