//! Output formatting helpers for the `brain` CLI: JSON mode vs.
//! human-readable text, and the shared BWT report printer (§4.8).

use std::io::{self, Write};

use brain_storage::BwtResponse;
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{json}");
    Ok(())
}

/// Prints a [`BwtResponse`]'s report: `errors` to stderr, `warnings` to
/// stderr prefixed `warning:`, and a one-line summary to stdout on
/// success (§4.8 exit code / output contract).
pub fn print_bwt_response(response: &BwtResponse, json: bool) -> anyhow::Result<()> {
    if json {
        return output_json(&bwt_response_json(response));
    }

    for warning in &response.report.warnings {
        eprintln!("warning: {warning}");
    }
    for error in &response.report.errors {
        eprintln!("{error}");
    }

    if response.success {
        match &response.record_id {
            Some(id) => println!("{id}"),
            None => println!("{}", response.report.message),
        }
    } else {
        eprintln!("{}", response.report.message);
    }

    Ok(())
}

fn bwt_response_json(response: &BwtResponse) -> serde_json::Value {
    serde_json::json!({
        "success": response.success,
        "recordId": response.record_id,
        "report": {
            "step": response.report.step,
            "message": response.report.message,
            "errors": response.report.errors,
            "warnings": response.report.warnings,
        }
    })
}
