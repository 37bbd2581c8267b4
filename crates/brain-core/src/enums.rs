//! Closed enum types for the brain record schema.
//!
//! Unlike the teacher's `beads-core::enums`, which allows arbitrary custom
//! values via a `Custom(String)` fallback, every enum named by the record
//! schema (§3.1) is a fixed, closed set -- there is no user-extensible
//! variant here, so a plain `serde(rename_all = "snake_case")` derive is
//! enough and a bad value is simply a deserialization error, which the
//! validator reports as a `SchemaViolation`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which category folder a record's scope maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeType {
    Project,
    Agent,
    User,
    Topic,
}

impl ScopeType {
    /// The abbreviation embedded in a `recordId` (§3.1, §4.1).
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Project => "proj",
            Self::Agent => "agent",
            Self::User => "user",
            Self::Topic => "topic",
        }
    }

    /// The top-level category folder this scope's documents live under.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Project => "10_projects",
            Self::Agent => "20_agents",
            Self::User => "00_user",
            Self::Topic => "30_topics",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// The record's lifecycle type (§3.1). `Rule` and `Decision` are the SSOT
/// types (see [`crate::record::Record::is_ssot_type`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Rule,
    Decision,
    Profile,
    Log,
    #[serde(rename = "ref")]
    Reference,
    Note,
    Candidate,
    Reminder,
    ProjectState,
}

impl RecordType {
    /// `true` for the two SSOT types (§3.1, §4.5).
    pub fn is_ssot(self) -> bool {
        matches!(self, Self::Rule | Self::Decision)
    }
}

/// Provenance of a record's content, gating SSOT promotion (§3.1, §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    UserConfirmed,
    Candidate,
    ChatLog,
    ExternalDoc,
    Inference,
}

impl SourceType {
    /// `true` for the provenance values that make an SSOT-typed record
    /// contaminated (§4.5).
    pub fn is_contaminating(self) -> bool {
        matches!(self, Self::Inference | Self::Candidate)
    }
}

/// Lifecycle status (§3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Deprecated,
    Archived,
}

/// The allowed tag axes (§3.1 invariant 6, §3.2 tags artifact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagAxis {
    Domain,
    Intent,
}

impl TagAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Intent => "intent",
        }
    }

    /// Parses the axis prefix of a `axis/value` tag, if it is one of the
    /// two allowed axes.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "domain" => Some(Self::Domain),
            "intent" => Some(Self::Intent),
            _ => None,
        }
    }
}

/// What a deprecated record's `replacedBy` field points to (§3.1).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReplacedBy {
    /// Superseded by another record.
    RecordId(String),
    /// The sentinel value meaning "retired with no direct successor".
    Obsolete,
}

const OBSOLETE_SENTINEL: &str = "obsolete";

impl ReplacedBy {
    pub fn as_str(&self) -> &str {
        match self {
            Self::RecordId(id) => id,
            Self::Obsolete => OBSOLETE_SENTINEL,
        }
    }

    pub fn is_obsolete(&self) -> bool {
        matches!(self, Self::Obsolete)
    }
}

impl Serialize for ReplacedBy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReplacedBy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(if s == OBSOLETE_SENTINEL {
            Self::Obsolete
        } else {
            Self::RecordId(s)
        })
    }
}
