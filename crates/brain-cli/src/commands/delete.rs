//! `brain delete` -- run the §4.5 delete gate, then submit a `delete`
//! intent to the BWT engine.

use anyhow::{Context as _, Result};
use brain_core::jsonl::parse_jsonl_str;
use brain_core::Intent;
use brain_lifecycle::check_delete;
use brain_storage::BwtEngine;

use crate::cli::DeleteArgs;
use crate::context::RuntimeContext;
use crate::output::print_bwt_response;

pub fn run(ctx: &RuntimeContext, args: &DeleteArgs) -> Result<()> {
    let paths = brain_storage::IndexPaths::new(&ctx.root);
    let content = std::fs::read_to_string(paths.records()).context("could not read records sequence")?;
    let records = parse_jsonl_str(&content).context("records sequence failed to parse")?;

    let record = records
        .iter()
        .find(|r| r.record_id == args.record_id)
        .with_context(|| format!("record not found: {}", args.record_id))?;

    check_delete(record, ctx.session_start, args.confirm)?;

    let intent = Intent::Delete {
        record_id: args.record_id.clone(),
    };

    let engine = BwtEngine::new(&ctx.root, ctx.clock());
    let response = engine.execute(intent);
    let success = response.success;
    print_bwt_response(&response, ctx.json)?;

    if !success {
        anyhow::bail!("delete failed");
    }
    Ok(())
}
