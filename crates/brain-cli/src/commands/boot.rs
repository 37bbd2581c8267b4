//! `brain boot` -- load policy and manifest, check drift, declare scope.

use anyhow::Result;
use brain_storage::{run_boot, IndexPaths};

use crate::cli::BootArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;
use crate::parse;

pub fn run(ctx: &RuntimeContext, args: &BootArgs) -> Result<()> {
    let explicit_scope = match (&args.scope_type, &args.scope_id) {
        (Some(scope_type), Some(scope_id)) => Some((parse::scope_type(scope_type)?, scope_id.clone())),
        _ => None,
    };

    let paths = IndexPaths::new(&ctx.root);
    let result = run_boot(&paths, explicit_scope)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "policy": result.policy,
            "manifest": result.manifest,
            "mismatches": result.mismatches.iter().map(|m| serde_json::json!({
                "path": m.path,
                "reason": m.reason,
            })).collect::<Vec<_>>(),
            "scope": {
                "scopeType": result.scope.scope_type,
                "scopeId": result.scope.scope_id,
                "userProfile": result.scope.user_profile,
            },
        }))?;
    } else {
        println!("policy loaded ({} bytes)", result.policy.len());
        println!("manifest: {} documents", result.manifest.files.len());
        if result.mismatches.is_empty() {
            println!("no drift detected");
        } else {
            for mismatch in &result.mismatches {
                println!("warning: {} ({})", mismatch.path, mismatch.reason);
            }
        }
        match (&result.scope.scope_type, &result.scope.scope_id) {
            (Some(scope_type), Some(scope_id)) => println!("scope: {scope_type} {scope_id}"),
            _ => println!("scope: undeclared"),
        }
    }

    Ok(())
}
