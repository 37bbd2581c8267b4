//! Runtime context for command execution.
//!
//! Built once in `main` after CLI parsing: resolves the store root (§6.3)
//! and carries the global flags every command handler needs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use brain_core::{Clock, SystemClock};
use chrono::{DateTime, Utc};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
pub struct RuntimeContext {
    pub root: PathBuf,
    pub json: bool,
    pub verbose: bool,
    pub clock: SystemClock,
    /// The instant this CLI invocation started, used as the delete
    /// gate's "current session" boundary (§4.5 precondition 2): a
    /// record deprecated moments ago in this same invocation can never
    /// satisfy it.
    pub session_start: DateTime<Utc>,
}

impl RuntimeContext {
    /// Resolves the root via §6.3 discovery, using `global.root` as the
    /// explicit override.
    pub fn resolve(global: &GlobalArgs) -> Result<Self> {
        let explicit = global.root.as_ref().map(PathBuf::from);
        let cwd = std::env::current_dir().context("could not read current directory")?;
        let root = brain_config::discover_root(explicit.as_deref(), &cwd)
            .context("no brain root found. Run 'brain init --root <path>' to create one.")?;

        Ok(Self {
            root,
            json: global.json,
            verbose: global.verbose,
            clock: SystemClock,
            session_start: Utc::now(),
        })
    }

    pub fn clock(&self) -> &dyn Clock {
        &self.clock
    }

    /// Resolves the target directory for `brain init`, which may not exist
    /// yet -- discovery proper (see [`Self::resolve`]) requires an already
    /// initialized `90_index` marker, so `init` uses a looser rule: the
    /// explicit `--root`, else `$BRAIN_ROOT`, else `~/Brain`.
    pub fn resolve_for_init(global: &GlobalArgs) -> Result<PathBuf> {
        if let Some(root) = &global.root {
            return Ok(PathBuf::from(root));
        }
        if let Ok(env_root) = std::env::var(brain_config::root::BRAIN_ROOT_ENV) {
            return Ok(PathBuf::from(env_root));
        }
        let home = dirs_home().context("could not determine a home directory for the default ~/Brain root")?;
        Ok(home.join("Brain"))
    }
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
