//! Root discovery (§6.3), modeled directly on the teacher's
//! `beads_config::beads_dir::find_beads_dir`: an environment-variable
//! override checked first, then a well-known name under the home
//! directory, then a walk up the ancestors of the current directory.
//!
//! Priority order (highest first):
//! 1. An explicit path supplied by the caller (e.g. a CLI `--root` flag).
//! 2. The `BRAIN_ROOT` environment variable.
//! 3. A directory named `Brain` directly under the user's home directory.
//! 4. The first ancestor of the current working directory containing a
//!    `Brain/90_index` subdirectory.

use std::env;
use std::path::{Path, PathBuf};

/// The environment variable that can override root discovery.
pub const BRAIN_ROOT_ENV: &str = "BRAIN_ROOT";

/// The well-known root directory name checked under `$HOME` and as the
/// ancestor-walk target.
const WELL_KNOWN_NAME: &str = "Brain";

/// The index folder whose presence marks a directory as an initialized
/// root (§2).
const INDEX_MARKER: &str = "90_index";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not discover a brain root: no explicit path, no {BRAIN_ROOT_ENV}, no ~/Brain, and no ancestor containing Brain/{INDEX_MARKER}")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Runs the full §6.3 discovery chain. `explicit` is the caller-supplied
/// path (e.g. from a CLI flag); `start` is the directory to walk up from
/// for priority 4 (normally the current working directory).
pub fn discover_root(explicit: Option<&Path>, start: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_dir() {
            return Ok(path.to_path_buf());
        }
    }

    if let Ok(env_path) = env::var(BRAIN_ROOT_ENV) {
        let candidate = PathBuf::from(&env_path);
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }

    if let Some(home) = home_dir() {
        let candidate = home.join(WELL_KNOWN_NAME);
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }

    if let Some(found) = find_ancestor_root(start) {
        return Ok(found);
    }

    Err(ConfigError::NotFound)
}

/// Walks up from `start`, looking for `<ancestor>/Brain/90_index`.
/// Returns `<ancestor>/Brain` if found.
fn find_ancestor_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(WELL_KNOWN_NAME);
        if candidate.join(INDEX_MARKER).is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => break,
        }
    }

    None
}

/// Minimal home-directory lookup (no extra crate dependency needed for
/// this single read).
fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}
