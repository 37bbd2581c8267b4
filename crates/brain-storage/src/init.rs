//! The idempotent initializer (§4.2).

use std::fs;
use std::path::PathBuf;

use brain_core::folders::FolderRegistry;
use brain_core::tags::TagsDocument;
use brain_core::{Clock, Manifest};
use tracing::info;

use crate::error::Result;
use crate::paths::IndexPaths;

/// The default policy document body written when `99_policy/brainPolicy.md`
/// is absent. Content is a placeholder for the caller's own policy; the
/// boot loader only requires the file's presence and reads its bytes.
const DEFAULT_POLICY: &str = "# Brain policy\n\nNo policy has been configured yet.\n";

/// Paths created vs skipped by a call to [`initialize`].
#[derive(Debug, Default)]
pub struct InitResult {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Creates the six category folders and, only if absent, the four index
/// artifacts plus the policy document. Re-running never overwrites an
/// existing file.
pub fn initialize(paths: &IndexPaths, clock: &dyn Clock) -> Result<InitResult> {
    let mut result = InitResult::default();

    for folder in paths.category_folders() {
        if folder.is_dir() {
            result.skipped.push(folder);
        } else {
            fs::create_dir_all(&folder)?;
            result.created.push(folder);
        }
    }

    write_if_absent(&mut result, paths.records(), b"")?;

    let manifest_json = serde_json::to_string_pretty(&Manifest::empty(clock.now()))
        .expect("Manifest serialization is infallible");
    write_if_absent(&mut result, paths.manifest(), manifest_json.as_bytes())?;

    let digest_text = brain_core::digest::render(&[]);
    write_if_absent(&mut result, paths.digest(), digest_text.as_bytes())?;

    let tags_json =
        serde_json::to_string_pretty(&TagsDocument::fixed()).expect("TagsDocument serialization is infallible");
    write_if_absent(&mut result, paths.tags(), tags_json.as_bytes())?;

    let registry_json = serde_json::to_string_pretty(&FolderRegistry::fixed())
        .expect("FolderRegistry serialization is infallible");
    write_if_absent(&mut result, paths.folder_registry(), registry_json.as_bytes())?;

    write_if_absent(&mut result, paths.policy(), DEFAULT_POLICY.as_bytes())?;

    info!(created = result.created.len(), skipped = result.skipped.len(), "initialized brain root");
    Ok(result)
}

fn write_if_absent(result: &mut InitResult, path: PathBuf, contents: &[u8]) -> Result<()> {
    if path.exists() {
        result.skipped.push(path);
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    result.created.push(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 7, 27, 0, 0, 0).unwrap())
    }

    #[test]
    fn initialize_creates_the_full_skeleton() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        let result = initialize(&paths, &clock()).unwrap();

        assert!(paths.records().is_file());
        assert!(paths.manifest().is_file());
        assert!(paths.digest().is_file());
        assert!(paths.tags().is_file());
        assert!(paths.folder_registry().is_file());
        assert!(paths.policy().is_file());
        for folder in paths.category_folders() {
            assert!(folder.is_dir());
        }
        assert_eq!(result.skipped.len(), 0);
    }

    #[test]
    fn rerunning_never_overwrites() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        initialize(&paths, &clock()).unwrap();

        fs::write(paths.policy(), b"custom policy").unwrap();
        let second = initialize(&paths, &clock()).unwrap();

        assert_eq!(fs::read(paths.policy()).unwrap(), b"custom policy");
        assert!(second.skipped.contains(&paths.policy()));
        assert_eq!(second.created.len(), 0);
    }
}
