//! Transaction intents (§4.3, §6.2) -- the caller-supplied request object
//! for the four BWT actions.

use serde::{Deserialize, Serialize};

use crate::enums::{RecordType, ReplacedBy, ScopeType, SourceType};

/// The fields of a new record the caller supplies on `create`; the
/// engine fills in `recordId`, `status`, `updatedAt`, and `contentHash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecordFields {
    pub scope_type: ScopeType,
    pub scope_id: String,
    pub record_type: RecordType,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub source_type: SourceType,
}

/// A sparse set of record fields an `update` intent may patch. Every
/// field left `None` is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub record_type: Option<RecordType>,
}

/// A BWT transaction intent (§4.3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    Create {
        source_ref: String,
        /// Absent iff the record indexes no document of its own.
        content: Option<String>,
        record: NewRecordFields,
    },
    Update {
        record_id: String,
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        fields: RecordPatch,
    },
    Deprecate {
        record_id: String,
        replaced_by: ReplacedBy,
        #[serde(default)]
        deprecation_reason: Option<String>,
    },
    Delete {
        record_id: String,
    },
}

impl Intent {
    /// A short label for logging and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Deprecate { .. } => "deprecate",
            Self::Delete { .. } => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_tags_on_action_field() {
        let intent = Intent::Delete {
            record_id: "rec_topic_a_20260727_0001".into(),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["action"], "delete");
        assert_eq!(intent.kind(), "delete");
    }

    #[test]
    fn deprecate_round_trips_obsolete_sentinel() {
        let intent = Intent::Deprecate {
            record_id: "rec_topic_a_20260727_0001".into(),
            replaced_by: ReplacedBy::Obsolete,
            deprecation_reason: Some("superseded".into()),
        };
        let json = serde_json::to_string(&intent).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, back);
    }
}
