//! `brain init` -- create the category folders and index artifacts.

use anyhow::Result;
use brain_core::SystemClock;
use brain_storage::{initialize, IndexPaths};

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

pub fn run(global: &GlobalArgs) -> Result<()> {
    let root = RuntimeContext::resolve_for_init(global)?;
    std::fs::create_dir_all(&root)?;

    let paths = IndexPaths::new(&root);
    let result = initialize(&paths, &SystemClock)?;

    if global.json {
        output_json(&serde_json::json!({
            "root": root,
            "created": result.created,
            "skipped": result.skipped,
        }))?;
    } else {
        println!("initialized brain store at {}", root.display());
        for path in &result.created {
            println!("  created {}", path.display());
        }
        for path in &result.skipped {
            println!("  skipped {} (already present)", path.display());
        }
    }

    Ok(())
}
