//! The Brain Write Transaction engine (§4.3): the nine-step
//! transactional writer behind every mutation to the store.

use std::fs;
use std::io;
use std::path::PathBuf;

use brain_core::digest::render as render_digest;
use brain_core::idgen::mint_record_id;
use brain_core::jsonl::{parse_jsonl_str, to_jsonl_string};
use brain_core::manifest::{Category, Manifest, ManifestEntry};
use brain_core::record::Record;
use brain_core::tags::all_tags_valid;
use brain_core::validation::{is_valid_scope_id, validate_records, ValidationError};
use brain_core::{Clock, ContentHash, Intent, Status};
use tracing::{debug, warn};

use crate::error::{BrainError, Result};
use crate::fsutil::{backup_if_exists, cleanup_backups, commit_renames, rollback, scan_residue, stage};
use crate::paths::{bak_path, tmp_path, IndexPaths};

/// The step reached, plus human messages and specific errors/warnings
/// (§6.2). Returned for both successful and failed transactions.
#[derive(Debug, Default, Clone)]
pub struct BwtReport {
    pub step: Option<u8>,
    pub message: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// `{success, recordId?, report}` (§6.2).
#[derive(Debug, Clone)]
pub struct BwtResponse {
    pub success: bool,
    pub record_id: Option<String>,
    pub report: BwtReport,
}

/// Accumulated staging state for a single transaction, used to drive
/// rollback if any step fails.
#[derive(Default)]
struct Transaction {
    step: u8,
    tmp_paths: Vec<PathBuf>,
    backups: Vec<(PathBuf, PathBuf)>,
}

pub struct BwtEngine<'a> {
    paths: IndexPaths,
    clock: &'a dyn Clock,
}

impl<'a> BwtEngine<'a> {
    pub fn new(root: impl Into<PathBuf>, clock: &'a dyn Clock) -> Self {
        Self {
            paths: IndexPaths::new(root),
            clock,
        }
    }

    /// Executes one intent end to end. Never returns an `Err` -- any
    /// step failure triggers rollback and is folded into a
    /// `success=false` response (§9: exceptions become a result
    /// variant).
    pub fn execute(&self, intent: Intent) -> BwtResponse {
        let mut tx = Transaction::default();
        match self.run(&intent, &mut tx) {
            Ok((record_id, report)) => BwtResponse {
                success: true,
                record_id: Some(record_id),
                report,
            },
            Err(err) => {
                warn!(step = tx.step, kind = intent.kind(), "rolling back transaction");
                rollback(&tx.tmp_paths, &tx.backups);
                BwtResponse {
                    success: false,
                    record_id: None,
                    report: BwtReport {
                        step: Some(tx.step),
                        message: err.to_string(),
                        errors: err.reasons(),
                        warnings: Vec::new(),
                    },
                }
            }
        }
    }

    fn run(&self, intent: &Intent, tx: &mut Transaction) -> Result<(String, BwtReport)> {
        let now = self.clock.now();

        // Step 1: intent validation.
        tx.step = 1;
        debug!(step = 1, kind = intent.kind(), "validating intent");
        let violations = validate_intent_shape(intent);
        if !violations.is_empty() {
            return Err(BrainError::IntentInvalid { violations });
        }

        // A NotFound lookup precedes the numbered steps so that an
        // unknown-id request produces no side effects at all.
        let mut records = load_records(&self.paths)?;
        let target_index = match intent {
            Intent::Create { .. } => None,
            Intent::Update { record_id, .. }
            | Intent::Deprecate { record_id, .. }
            | Intent::Delete { record_id } => Some(
                records
                    .iter()
                    .position(|r| &r.record_id == record_id)
                    .ok_or_else(|| BrainError::not_found(record_id.clone()))?,
            ),
        };

        // Step 2: pre-commit residue check.
        tx.step = 2;
        debug!(step = 2, "scanning for residue");
        let residue = scan_residue(&self.paths.index_dir())?;
        if !residue.is_empty() {
            return Err(BrainError::Residue { paths: residue });
        }

        // Step 3: backups.
        tx.step = 3;
        debug!(step = 3, "backing up index artifacts");
        for path in [self.paths.records(), self.paths.manifest(), self.paths.digest()] {
            let bak = bak_path(&path);
            if backup_if_exists(&path, &bak)? {
                tx.backups.push((path, bak));
            }
        }
        let target_source_ref = target_index.map(|idx| records[idx].source_ref.clone());
        let target_document = target_source_ref.as_deref().map(|r| self.paths.document(r));
        if let Some(doc) = &target_document {
            let bak = bak_path(doc);
            if backup_if_exists(doc, &bak)? {
                tx.backups.push((doc.clone(), bak));
            }
        }

        // Step 4: directory preparation (create only).
        tx.step = 4;
        if let Intent::Create { source_ref, .. } = intent {
            debug!(step = 4, source_ref, "preparing directory");
            let doc_path = self.paths.document(source_ref);
            if let Some(parent) = doc_path.parent() {
                if !parent.is_dir() {
                    if source_ref.starts_with("30_topics/") {
                        fs::create_dir_all(parent)?;
                    } else {
                        return Err(BrainError::scope_violation(format!(
                            "cannot auto-create folder for {source_ref}, only 30_topics/ allows it"
                        )));
                    }
                }
            }
        }

        // Step 5: document staging.
        tx.step = 5;
        let content = match intent {
            Intent::Create { content, .. } => content.as_deref(),
            Intent::Update { content, .. } => content.as_deref(),
            _ => None,
        };
        let mut staged_document: Option<(PathBuf, PathBuf)> = None; // (tmp, final)
        let mut staged_hash: Option<ContentHash> = None;
        let mut staged_len: u64 = 0;
        if let Some(content) = content {
            debug!(step = 5, "staging document");
            let final_doc = match intent {
                Intent::Create { source_ref, .. } => self.paths.document(source_ref),
                _ => target_document.clone().expect("update with content always targets an existing record"),
            };
            let tmp = tmp_path(&final_doc);
            stage(&tmp, content.as_bytes())?;
            tx.tmp_paths.push(tmp.clone());
            staged_hash = Some(ContentHash::of_str(content));
            staged_len = content.as_bytes().len() as u64;
            staged_document = Some((tmp, final_doc));
        }

        // Step 6: records staging.
        tx.step = 6;
        debug!(step = 6, "staging records");
        let source_ref_for_manifest = match intent {
            Intent::Create { source_ref, .. } => Some(source_ref.clone()),
            _ => target_source_ref.clone(),
        };
        let record_id = match intent {
            Intent::Create { source_ref, record, .. } => {
                let id = mint_record_id(record.scope_type, &record.scope_id, &records, now);
                let hash = staged_hash.clone().unwrap_or_else(|| ContentHash::of_str(""));
                records.push(Record {
                    record_id: id.clone(),
                    scope_type: record.scope_type,
                    scope_id: record.scope_id.clone(),
                    record_type: record.record_type,
                    title: record.title.clone(),
                    summary: record.summary.clone(),
                    tags: record.tags.clone(),
                    source_type: record.source_type,
                    source_ref: source_ref.clone(),
                    status: Status::Active,
                    replaced_by: None,
                    deprecation_reason: None,
                    updated_at: now,
                    content_hash: hash,
                });
                id
            }
            Intent::Update { record_id, fields, .. } => {
                let idx = target_index.expect("update always targets an existing record");
                let r = &mut records[idx];
                if let Some(title) = &fields.title {
                    r.title = title.clone();
                }
                if let Some(summary) = &fields.summary {
                    r.summary = summary.clone();
                }
                if let Some(tags) = &fields.tags {
                    r.tags = tags.clone();
                }
                if let Some(source_type) = fields.source_type {
                    r.source_type = source_type;
                }
                if let Some(record_type) = fields.record_type {
                    r.record_type = record_type;
                }
                if let Some(hash) = &staged_hash {
                    r.content_hash = hash.clone();
                }
                r.updated_at = now;
                record_id.clone()
            }
            Intent::Deprecate {
                record_id,
                replaced_by,
                deprecation_reason,
            } => {
                let idx = target_index.expect("deprecate always targets an existing record");
                let r = &mut records[idx];
                r.status = Status::Deprecated;
                r.replaced_by = Some(replaced_by.clone());
                r.deprecation_reason = deprecation_reason.clone();
                r.updated_at = now;
                record_id.clone()
            }
            Intent::Delete { record_id } => {
                let idx = target_index.expect("delete always targets an existing record");
                records.remove(idx);
                record_id.clone()
            }
        };
        let records_tmp = tmp_path(&self.paths.records());
        let records_body = to_jsonl_string(&records).map_err(|e| BrainError::IoFault(io_err(e)))?;
        stage(&records_tmp, records_body.as_bytes())?;
        tx.tmp_paths.push(records_tmp.clone());

        // Step 7: manifest staging.
        tx.step = 7;
        debug!(step = 7, "staging manifest");
        let mut manifest = load_manifest(&self.paths, now)?;
        if matches!(intent, Intent::Delete { .. }) {
            if let Some(source_ref) = &source_ref_for_manifest {
                manifest.remove(source_ref, now);
            }
        } else if let (Some(hash), Some(source_ref)) = (&staged_hash, &source_ref_for_manifest) {
            manifest.upsert(
                ManifestEntry {
                    path: source_ref.clone(),
                    hash: hash.clone(),
                    size: staged_len,
                    updated_at: now,
                    category: Category::from_path(source_ref),
                },
                now,
            );
        }
        let manifest_tmp = tmp_path(&self.paths.manifest());
        let manifest_body = serde_json::to_string_pretty(&manifest).map_err(|e| BrainError::IoFault(io_err(e)))?;
        stage(&manifest_tmp, manifest_body.as_bytes())?;
        tx.tmp_paths.push(manifest_tmp.clone());

        // Step 8: digest staging.
        tx.step = 8;
        debug!(step = 8, "staging digest");
        let digest_tmp = tmp_path(&self.paths.digest());
        stage(&digest_tmp, render_digest(&records).as_bytes())?;
        tx.tmp_paths.push(digest_tmp.clone());

        // Step 9: pre-commit validation (tmp mode).
        tx.step = 9;
        debug!(step = 9, "pre-commit validation");
        let mut precommit_errors: Vec<String> = Vec::new();

        match fs::read_to_string(&records_tmp).map(|body| parse_jsonl_str(&body)) {
            Ok(Ok(reread_records)) => {
                precommit_errors.extend(validate_records(&reread_records).into_iter().map(|e| e.to_string()));
            }
            Ok(Err(e)) => precommit_errors.push(format!("staged records failed to re-parse: {e}")),
            Err(e) => precommit_errors.push(format!("staged records unreadable: {e}")),
        }

        let reread_manifest: Option<Manifest> = match fs::read_to_string(&manifest_tmp) {
            Ok(body) => match serde_json::from_str(&body) {
                Ok(m) => Some(m),
                Err(e) => {
                    precommit_errors.push(format!("staged manifest failed to re-parse: {e}"));
                    None
                }
            },
            Err(e) => {
                precommit_errors.push(format!("staged manifest unreadable: {e}"));
                None
            }
        };

        if !matches!(intent, Intent::Delete { .. }) {
            if let (Some(hash), Some(source_ref), Some(manifest)) = (&staged_hash, &source_ref_for_manifest, &reread_manifest) {
                match manifest.entry(source_ref) {
                    Some(entry) if &entry.hash == hash => {}
                    Some(entry) => precommit_errors.push(format!(
                        "staged manifest hash for {source_ref} is {entry_hash}, expected {hash}",
                        entry_hash = entry.hash
                    )),
                    None => precommit_errors.push(format!("staged manifest has no entry for {source_ref}")),
                }
                if let Some((tmp, _)) = &staged_document {
                    if let Ok(bytes) = fs::read(tmp) {
                        if &ContentHash::of_bytes(&bytes) != hash {
                            precommit_errors.push(format!("staged document bytes for {source_ref} do not match its computed hash"));
                        }
                    }
                }
            }
        }

        if !precommit_errors.is_empty() {
            return Err(BrainError::SchemaViolation {
                errors: precommit_errors
                    .into_iter()
                    .map(|message| ValidationError { record_id: None, message })
                    .collect(),
            });
        }

        // Commit: document (if any), records, manifest, digest, in that
        // fixed order.
        let mut ordered_renames = Vec::new();
        if let Some((tmp, finale)) = staged_document {
            ordered_renames.push((tmp, finale));
        }
        ordered_renames.push((records_tmp, self.paths.records()));
        ordered_renames.push((manifest_tmp, self.paths.manifest()));
        ordered_renames.push((digest_tmp, self.paths.digest()));
        commit_renames(&ordered_renames)?;

        let backup_paths: Vec<PathBuf> = tx.backups.iter().map(|(_, bak)| bak.clone()).collect();
        cleanup_backups(&backup_paths);
        tx.tmp_paths.clear();
        tx.backups.clear();

        let warnings = brain_core::validation::growth_warning(records.len()).into_iter().collect();
        Ok((
            record_id,
            BwtReport {
                step: Some(9),
                message: format!("{} committed", intent.kind()),
                errors: Vec::new(),
                warnings,
            },
        ))
    }
}

fn io_err(msg: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}

fn load_records(paths: &IndexPaths) -> Result<Vec<Record>> {
    let path = paths.records();
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    parse_jsonl_str(&content).map_err(|e| BrainError::IoFault(io_err(e)))
}

fn load_manifest(paths: &IndexPaths, now: chrono::DateTime<chrono::Utc>) -> Result<Manifest> {
    let path = paths.manifest();
    if !path.is_file() {
        return Ok(Manifest::empty(now));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| BrainError::IoFault(io_err(e)))
}

fn validate_intent_shape(intent: &Intent) -> Vec<String> {
    let mut violations = Vec::new();
    match intent {
        Intent::Create { source_ref, record, .. } => {
            if source_ref.is_empty() {
                violations.push("sourceRef must not be empty".into());
            }
            if record.title.is_empty() {
                violations.push("title must not be empty".into());
            }
            if !is_valid_scope_id(&record.scope_id) {
                violations.push(format!("scopeId '{}' is not a valid slug", record.scope_id));
            }
            if !all_tags_valid(&record.tags) {
                violations.push("tags must be axis/value with axis in {domain, intent}".into());
            }
        }
        Intent::Update { record_id, fields, .. } => {
            if record_id.is_empty() {
                violations.push("recordId must not be empty".into());
            }
            if let Some(title) = &fields.title {
                if title.is_empty() {
                    violations.push("title must not be empty".into());
                }
            }
            if let Some(tags) = &fields.tags {
                if !all_tags_valid(tags) {
                    violations.push("tags must be axis/value with axis in {domain, intent}".into());
                }
            }
        }
        Intent::Deprecate {
            record_id,
            replaced_by,
            deprecation_reason,
        } => {
            if record_id.is_empty() {
                violations.push("recordId must not be empty".into());
            }
            if replaced_by.is_obsolete() && deprecation_reason.as_deref().is_none_or(|r| r.is_empty()) {
                violations.push("replacedBy='obsolete' requires a non-empty deprecationReason".into());
            }
        }
        Intent::Delete { record_id } => {
            if record_id.is_empty() {
                violations.push("recordId must not be empty".into());
            }
        }
    }
    violations
}
