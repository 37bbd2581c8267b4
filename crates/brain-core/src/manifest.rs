//! The manifest index artifact (§3.2, §6.1).
//!
//! A map from document path (relative to root) to `{hash, size,
//! updatedAt, category}`, plus a summary of totals by category and a
//! global `updatedAt`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::ContentHash;

/// The category a document belongs to, derived from its leading path
/// segment (§6.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    User,
    Project,
    Agent,
    Topic,
    Index,
    Policy,
    Other,
}

impl Category {
    /// Derives the category from a root-relative path by its first
    /// segment.
    pub fn from_path(path: &str) -> Self {
        match path.split('/').next().unwrap_or("") {
            "00_user" => Self::User,
            "10_projects" => Self::Project,
            "20_agents" => Self::Agent,
            "30_topics" => Self::Topic,
            "90_index" => Self::Index,
            "99_policy" => Self::Policy,
            _ => Self::Other,
        }
    }
}

/// One manifest row: the recorded hash/size/category for a document path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub path: String,
    pub hash: ContentHash,
    pub size: u64,
    #[serde(with = "crate::time_fmt::millis_rfc3339")]
    pub updated_at: DateTime<Utc>,
    pub category: Category,
}

/// Totals by category, plus the grand total (§3.2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub user: usize,
    pub project: usize,
    pub agent: usize,
    pub topic: usize,
    pub index: usize,
    pub policy: usize,
    pub other: usize,
    pub total: usize,
}

impl CategorySummary {
    /// Recomputes totals from a complete set of manifest entries.
    pub fn from_entries<'a>(entries: impl Iterator<Item = &'a ManifestEntry>) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.category {
                Category::User => summary.user += 1,
                Category::Project => summary.project += 1,
                Category::Agent => summary.agent += 1,
                Category::Topic => summary.topic += 1,
                Category::Index => summary.index += 1,
                Category::Policy => summary.policy += 1,
                Category::Other => summary.other += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// The full manifest document (§6.1): `{version, updatedAt, summary,
/// files[]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: u32,
    #[serde(with = "crate::time_fmt::millis_rfc3339")]
    pub updated_at: DateTime<Utc>,
    pub summary: CategorySummary,
    pub files: Vec<ManifestEntry>,
}

pub const MANIFEST_VERSION: u32 = 1;

impl Manifest {
    /// An empty manifest, as written by the initializer (§4.2).
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            updated_at: now,
            summary: CategorySummary::default(),
            files: Vec::new(),
        }
    }

    /// Looks up the entry for a path, keyed by root-relative path.
    pub fn entry(&self, path: &str) -> Option<&ManifestEntry> {
        self.files.iter().find(|e| e.path == path)
    }

    /// Returns a path→entry view for efficient repeated lookups.
    pub fn by_path(&self) -> BTreeMap<&str, &ManifestEntry> {
        self.files.iter().map(|e| (e.path.as_str(), e)).collect()
    }

    /// Inserts or replaces the entry for `path`, then recomputes the
    /// summary and `updatedAt` (§4.3 step 7).
    pub fn upsert(&mut self, entry: ManifestEntry, now: DateTime<Utc>) {
        if let Some(existing) = self.files.iter_mut().find(|e| e.path == entry.path) {
            *existing = entry;
        } else {
            self.files.push(entry);
        }
        self.summary = CategorySummary::from_entries(self.files.iter());
        self.updated_at = now;
    }

    /// Removes the entry for `path`, if present, then recomputes the
    /// summary and `updatedAt`.
    pub fn remove(&mut self, path: &str, now: DateTime<Utc>) {
        self.files.retain(|e| e.path != path);
        self.summary = CategorySummary::from_entries(self.files.iter());
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 27, 0, 0, 0).unwrap()
    }

    #[test]
    fn category_from_path() {
        assert_eq!(Category::from_path("30_topics/x/notes.md"), Category::Topic);
        assert_eq!(Category::from_path("90_index/records.jsonl"), Category::Index);
        assert_eq!(Category::from_path("weird/path.md"), Category::Other);
    }

    #[test]
    fn upsert_recomputes_summary() {
        let mut m = Manifest::empty(ts());
        m.upsert(
            ManifestEntry {
                path: "30_topics/x/notes.md".into(),
                hash: ContentHash::of_str("a"),
                size: 1,
                updated_at: ts(),
                category: Category::Topic,
            },
            ts(),
        );
        assert_eq!(m.summary.topic, 1);
        assert_eq!(m.summary.total, 1);
    }

    #[test]
    fn upsert_replaces_existing_path() {
        let mut m = Manifest::empty(ts());
        let e = ManifestEntry {
            path: "30_topics/x/notes.md".into(),
            hash: ContentHash::of_str("a"),
            size: 1,
            updated_at: ts(),
            category: Category::Topic,
        };
        m.upsert(e.clone(), ts());
        let mut e2 = e;
        e2.hash = ContentHash::of_str("b");
        e2.size = 2;
        m.upsert(e2, ts());
        assert_eq!(m.files.len(), 1);
        assert_eq!(m.summary.total, 1);
        assert_eq!(m.entry("30_topics/x/notes.md").unwrap().size, 2);
    }

    #[test]
    fn remove_recomputes_summary() {
        let mut m = Manifest::empty(ts());
        m.upsert(
            ManifestEntry {
                path: "30_topics/x/notes.md".into(),
                hash: ContentHash::of_str("a"),
                size: 1,
                updated_at: ts(),
                category: Category::Topic,
            },
            ts(),
        );
        m.remove("30_topics/x/notes.md", ts());
        assert_eq!(m.summary.total, 0);
        assert!(m.files.is_empty());
    }
}
