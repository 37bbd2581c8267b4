//! `brain deprecate` -- submit a `deprecate` intent to the BWT engine.

use anyhow::Result;
use brain_core::Intent;
use brain_storage::BwtEngine;

use crate::cli::DeprecateArgs;
use crate::context::RuntimeContext;
use crate::output::print_bwt_response;
use crate::parse;

pub fn run(ctx: &RuntimeContext, args: &DeprecateArgs) -> Result<()> {
    let intent = Intent::Deprecate {
        record_id: args.record_id.clone(),
        replaced_by: parse::replaced_by(&args.replaced_by),
        deprecation_reason: args.deprecation_reason.clone(),
    };

    let engine = BwtEngine::new(&ctx.root, ctx.clock());
    let response = engine.execute(intent);
    let success = response.success;
    print_bwt_response(&response, ctx.json)?;

    if !success {
        anyhow::bail!("deprecate failed");
    }
    Ok(())
}
