//! Filesystem primitives the BWT engine builds its steps from: residue
//! scanning, backup, atomic-ish commit via rename, and rollback.
//!
//! Nothing here knows about records or intents -- it only moves bytes
//! and paths around, the same separation the teacher draws between its
//! SQLite store and the pure domain types layered on top of it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BrainError, Result};

/// Step 2: any `.tmp` file directly under `dir` is residue from an
/// unfinished transaction.
pub fn scan_residue(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "tmp") {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Step 3: copies `path` to `path.bak` if `path` exists. Returns `true`
/// if a backup was made (and should be tracked for rollback/cleanup).
pub fn backup_if_exists(path: &Path, bak: &Path) -> Result<bool> {
    if path.exists() {
        fs::copy(path, bak)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Writes `contents` to `tmp_path`, creating parent directories as
/// needed (the caller has already run the directory-preparation gate).
pub fn stage(tmp_path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = tmp_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(tmp_path, contents)?;
    Ok(())
}

/// Commit step: renames each staged `.tmp` path onto its final name, in
/// the caller-supplied order. On a rename failure partway through,
/// reverses the renames already performed (best effort) and returns the
/// error, leaving the transaction in a rollback-able state.
pub fn commit_renames(renames: &[(PathBuf, PathBuf)]) -> Result<()> {
    let mut done: Vec<&(PathBuf, PathBuf)> = Vec::new();
    for pair in renames {
        let (tmp, finale) = pair;
        if let Err(e) = fs::rename(tmp, finale) {
            for (tmp, finale) in done.into_iter().rev() {
                let _ = fs::rename(finale, tmp);
            }
            return Err(BrainError::IoFault(e));
        }
        done.push(pair);
    }
    Ok(())
}

/// Best-effort unlink of every `.bak` file tracked during step 3, called
/// after a successful commit.
pub fn cleanup_backups(backups: &[PathBuf]) {
    for bak in backups {
        let _ = fs::remove_file(bak);
    }
}

/// Rollback: removes any remaining `.tmp` files, then restores every
/// tracked `.bak` over its original path and removes the `.bak`. Never
/// raises -- partial failures here simply surface as residue on the next
/// run (§7 propagation policy).
pub fn rollback(tmp_paths: &[PathBuf], backups: &[(PathBuf, PathBuf)]) {
    for tmp in tmp_paths {
        let _ = fs::remove_file(tmp);
    }
    for (original, bak) in backups {
        if bak.exists() {
            let _ = fs::copy(bak, original);
            let _ = fs::remove_file(bak);
        }
    }
}
