//! The standalone validator (§4.4): a pure read-only check of the
//! on-disk store, in either committed or tmp mode.
//!
//! Check 6 (the back-reference detector, `--full` mode) lives in
//! `brain-lifecycle` rather than here, to avoid this crate depending on
//! the lifecycle crate -- callers that want `--full` behavior run both
//! and merge the reports, as `brain-cli`'s `validate` subcommand does.

use std::fs;

use brain_core::jsonl::parse_jsonl_str;
use brain_core::manifest::Manifest;
use brain_core::record::Record;
use brain_core::validation::{growth_warning, validate_records};
use brain_core::ContentHash;

use crate::error::Result;
use crate::fsutil::scan_residue;
use crate::paths::IndexPaths;

/// Which set of files to read: the committed ones, or their `.tmp`
/// staged counterparts (as re-read at BWT step 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Committed,
    Tmp,
}

/// The outcome of a validation pass: specific, human-readable messages,
/// split into hard errors and advisory warnings (§4.4).
#[derive(Debug, Default, Clone)]
pub struct ValidateReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidateReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

fn with_suffix(path: std::path::PathBuf, mode: ValidationMode) -> std::path::PathBuf {
    match mode {
        ValidationMode::Committed => path,
        ValidationMode::Tmp => crate::paths::tmp_path(&path),
    }
}

/// Runs checks 1-5 of §4.4 against the store rooted at `paths`.
pub fn validate(paths: &IndexPaths, mode: ValidationMode) -> Result<ValidateReport> {
    let mut report = ValidateReport::default();

    // Check 1: required files present.
    for (label, path) in [
        ("policy document", paths.policy()),
        ("tags declaration", paths.tags()),
        ("folder registry", paths.folder_registry()),
    ] {
        if !path.is_file() {
            report.errors.push(format!("{label} missing at {}", path.display()));
        }
    }

    let records_path = with_suffix(paths.records(), mode);
    let records: Vec<Record> = if records_path.is_file() {
        let content = fs::read_to_string(&records_path)?;
        match parse_jsonl_str(&content) {
            Ok(records) => records,
            Err(e) => {
                report.errors.push(format!("records sequence failed to parse: {e}"));
                Vec::new()
            }
        }
    } else {
        report.errors.push(format!("records sequence missing at {}", records_path.display()));
        Vec::new()
    };

    // Check 2: per-record rules and invariants 1, 4, 6.
    report
        .errors
        .extend(validate_records(&records).into_iter().map(|e| e.to_string()));

    // Check 3: growth-signal warning.
    if let Some(warning) = growth_warning(records.len()) {
        report.warnings.push(warning);
    }

    // Check 4: manifest entries resolve to existing files with a
    // matching hash.
    let manifest_path = with_suffix(paths.manifest(), mode);
    if manifest_path.is_file() {
        let manifest_content = fs::read_to_string(&manifest_path)?;
        match serde_json::from_str::<Manifest>(&manifest_content) {
            Ok(manifest) => {
                for entry in &manifest.files {
                    let doc_path = with_suffix(paths.document(&entry.path), mode);
                    match fs::read(&doc_path) {
                        Ok(bytes) => {
                            let actual = ContentHash::of_bytes(&bytes);
                            if actual != entry.hash {
                                let message = format!("manifest entry {} hash mismatch", entry.path);
                                match mode {
                                    ValidationMode::Tmp => report.errors.push(message),
                                    ValidationMode::Committed => {
                                        report.warnings.push(format!("manual-edit suspected: {message}"))
                                    }
                                }
                            }
                        }
                        Err(_) => {
                            let message = format!("manifest entry {} has no file on disk", entry.path);
                            match mode {
                                ValidationMode::Tmp => report.errors.push(message),
                                ValidationMode::Committed => report.warnings.push(message),
                            }
                        }
                    }
                }
            }
            Err(e) => report.errors.push(format!("manifest failed to parse: {e}")),
        }
    } else {
        report.errors.push(format!("manifest missing at {}", manifest_path.display()));
    }

    // Check 5: residue scan, committed mode only.
    if mode == ValidationMode::Committed {
        for path in scan_residue(&paths.index_dir())? {
            report.warnings.push(format!("residue file present: {}", path.display()));
        }
        for entry in fs::read_dir(paths.index_dir())? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "bak") {
                report.warnings.push(format!("backup file present: {}", path.display()));
            }
        }
    }

    Ok(report)
}
