//! `brain write` -- submit a `create` intent to the BWT engine.

use anyhow::Result;
use brain_core::intent::NewRecordFields;
use brain_core::Intent;
use brain_storage::BwtEngine;

use crate::cli::WriteArgs;
use crate::context::RuntimeContext;
use crate::output::print_bwt_response;
use crate::parse;

pub fn run(ctx: &RuntimeContext, args: &WriteArgs) -> Result<()> {
    let intent = Intent::Create {
        source_ref: args.source_ref.clone(),
        content: args.content.clone(),
        record: NewRecordFields {
            scope_type: parse::scope_type(&args.scope_type)?,
            scope_id: args.scope_id.clone(),
            record_type: parse::record_type(&args.record_type)?,
            title: args.title.clone(),
            summary: args.summary.clone(),
            tags: args.tags.clone(),
            source_type: parse::source_type(&args.source_type)?,
        },
    };

    let engine = BwtEngine::new(&ctx.root, ctx.clock());
    let response = engine.execute(intent);
    let success = response.success;
    print_bwt_response(&response, ctx.json)?;

    if !success {
        anyhow::bail!("write failed");
    }
    Ok(())
}
