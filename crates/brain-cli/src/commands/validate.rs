//! `brain validate` -- run the standalone validator (checks 1-5), and,
//! with `--full`, the back-reference detector (check 6) from
//! `brain-lifecycle`, merging both reports (§4.4, §4.8).

use anyhow::{Context as _, Result};
use brain_core::jsonl::parse_jsonl_str;
use brain_lifecycle::backref;
use brain_storage::{validate as validate_store, IndexPaths, ValidateReport, ValidationMode};

use crate::cli::ValidateArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

pub fn run(ctx: &RuntimeContext, args: &ValidateArgs) -> Result<()> {
    let paths = IndexPaths::new(&ctx.root);
    let mut report: ValidateReport = validate_store(&paths, ValidationMode::Committed)?;

    if args.full {
        let content = std::fs::read_to_string(paths.records()).context("could not read records sequence")?;
        let records = parse_jsonl_str(&content).context("records sequence failed to parse")?;
        for back_reference in backref::scan(&records) {
            report.warnings.push(format!(
                "active record {} still references deprecated record {}",
                back_reference.active_record_id, back_reference.deprecated_record_id
            ));
        }
    }

    let ok = report.is_ok();

    if ctx.json {
        output_json(&serde_json::json!({
            "ok": ok,
            "errors": report.errors,
            "warnings": report.warnings,
        }))?;
    } else {
        for warning in &report.warnings {
            println!("warning: {warning}");
        }
        for error in &report.errors {
            eprintln!("{error}");
        }
        println!("{}", if ok { "valid" } else { "invalid" });
    }

    if !ok {
        anyhow::bail!("validation failed");
    }
    Ok(())
}
