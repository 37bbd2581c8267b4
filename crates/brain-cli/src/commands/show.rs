//! `brain show` -- look up one record's full fields by id (§4.7 detail
//! lookup).

use anyhow::{Context as _, Result};
use brain_query::find_record;
use brain_storage::IndexPaths;

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let paths = IndexPaths::new(&ctx.root);
    let content = std::fs::read_to_string(paths.records()).context("could not read records sequence")?;

    let record = find_record(&content, &args.record_id)
        .with_context(|| format!("record not found: {}", args.record_id))?;

    if ctx.json {
        output_json(&record)?;
    } else {
        println!("{}  {}", record.record_id, record.title);
        println!("  scope: {} {}", record.scope_type, record.scope_id);
        println!("  type: {:?}  status: {:?}", record.record_type, record.status);
        println!("  summary: {}", record.summary);
        println!("  tags: {}", record.tags.join(", "));
        println!("  sourceRef: {}", record.source_ref);
        println!("  updatedAt: {}", record.updated_at.to_rfc3339());
        if let Some(reason) = &record.deprecation_reason {
            println!("  deprecationReason: {reason}");
        }
    }

    Ok(())
}
