//! Fixed on-disk layout (§6.1), resolved against a root directory.

use std::path::{Path, PathBuf};

use brain_core::folders::CATEGORY_FOLDERS;

/// The root-relative paths of the three index artifacts the BWT engine
/// stages and commits on every transaction, plus the two static
/// declarations the initializer writes once.
pub struct IndexPaths {
    pub root: PathBuf,
}

pub const RECORDS_REL: &str = "90_index/records.jsonl";
pub const MANIFEST_REL: &str = "90_index/manifest.json";
pub const DIGEST_REL: &str = "90_index/records_digest.txt";
pub const TAGS_REL: &str = "90_index/tags.json";
pub const FOLDER_REGISTRY_REL: &str = "90_index/folderRegistry.json";
pub const POLICY_REL: &str = "99_policy/brainPolicy.md";
pub const INDEX_FOLDER: &str = "90_index";

impl IndexPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn records(&self) -> PathBuf {
        self.root.join(RECORDS_REL)
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_REL)
    }

    pub fn digest(&self) -> PathBuf {
        self.root.join(DIGEST_REL)
    }

    pub fn tags(&self) -> PathBuf {
        self.root.join(TAGS_REL)
    }

    pub fn folder_registry(&self) -> PathBuf {
        self.root.join(FOLDER_REGISTRY_REL)
    }

    pub fn policy(&self) -> PathBuf {
        self.root.join(POLICY_REL)
    }

    pub fn index_dir(&self) -> PathBuf {
        self.root.join(INDEX_FOLDER)
    }

    /// Resolves a record's `sourceRef` (root-relative) to an absolute path.
    pub fn document(&self, source_ref: &str) -> PathBuf {
        self.root.join(source_ref)
    }

    /// The six category folders, as absolute paths.
    pub fn category_folders(&self) -> impl Iterator<Item = PathBuf> + '_ {
        CATEGORY_FOLDERS.iter().map(move |f| self.root.join(f))
    }
}

/// `.tmp` staging path for a committed artifact path.
pub fn tmp_path(path: &Path) -> PathBuf {
    append_suffix(path, ".tmp")
}

/// `.bak` backup path for a committed artifact path.
pub fn bak_path(path: &Path) -> PathBuf {
    append_suffix(path, ".bak")
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}
