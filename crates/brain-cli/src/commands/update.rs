//! `brain update` -- submit an `update` intent to the BWT engine.

use anyhow::Result;
use brain_core::intent::RecordPatch;
use brain_core::Intent;
use brain_storage::BwtEngine;

use crate::cli::UpdateArgs;
use crate::context::RuntimeContext;
use crate::output::print_bwt_response;
use crate::parse;

pub fn run(ctx: &RuntimeContext, args: &UpdateArgs) -> Result<()> {
    let fields = RecordPatch {
        title: args.title.clone(),
        summary: args.summary.clone(),
        tags: args.tags.clone(),
        source_type: args.source_type.as_deref().map(parse::source_type).transpose()?,
        record_type: args.record_type.as_deref().map(parse::record_type).transpose()?,
    };

    let intent = Intent::Update {
        record_id: args.record_id.clone(),
        content: args.content.clone(),
        fields,
    };

    let engine = BwtEngine::new(&ctx.root, ctx.clock());
    let response = engine.execute(intent);
    let success = response.success;
    print_bwt_response(&response, ctx.json)?;

    if !success {
        anyhow::bail!("update failed");
    }
    Ok(())
}
