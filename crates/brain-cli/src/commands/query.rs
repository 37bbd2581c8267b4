//! `brain query` -- run the digest-first query pipeline (§4.7).

use anyhow::{Context as _, Result};
use brain_query::{query_digest, QueryRequest};
use brain_storage::IndexPaths;

use crate::cli::QueryArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;
use crate::parse;

pub fn run(ctx: &RuntimeContext, args: &QueryArgs) -> Result<()> {
    let paths = IndexPaths::new(&ctx.root);
    let digest_content = std::fs::read_to_string(paths.digest()).context("could not read records digest")?;

    let request = QueryRequest {
        scope_type: args.scope_type.as_deref().map(parse::scope_type).transpose()?,
        scope_id: args.scope_id.clone(),
        goal: args.goal.clone(),
        top_k: args.top_k,
    };

    let response = query_digest(&digest_content, &request);

    if ctx.json {
        output_json(&serde_json::json!({
            "total": response.total,
            "candidates": response.candidates.iter().map(|c| serde_json::json!({
                "recordId": c.record_id,
                "title": c.title,
                "summary": c.summary,
                "tags": c.tags,
                "status": c.status,
                "score": c.score,
            })).collect::<Vec<_>>(),
        }))?;
    } else {
        println!("{} active record(s), top {} shown", response.total, response.candidates.len());
        for candidate in &response.candidates {
            println!("{}  [{}]  {}", candidate.record_id, candidate.score, candidate.title);
        }
    }

    Ok(())
}
