//! The `folderRegistry.json` index artifact (§3.2): a fixed declaration
//! of the six category folders.

use serde::{Deserialize, Serialize};

/// The six category folders under the root, in their canonical order.
pub const CATEGORY_FOLDERS: [&str; 6] = [
    "00_user",
    "10_projects",
    "20_agents",
    "30_topics",
    "90_index",
    "99_policy",
];

/// `{folders: [...]}` -- the fixed declaration written by the initializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRegistry {
    pub folders: Vec<String>,
}

impl FolderRegistry {
    pub fn fixed() -> Self {
        Self {
            folders: CATEGORY_FOLDERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
