//! The boot loader (§4.6): loads the policy and manifest, checks for
//! drift, and declares the caller's working scope. Boot never writes.

use std::fs;

use brain_core::{ContentHash, Manifest, ScopeType};
use tracing::warn;

use crate::error::{BrainError, Result};
use crate::paths::IndexPaths;

/// The optional per-install user-profile document, read verbatim if
/// present -- there is no structured schema for it, only Markdown text
/// the caller may use to infer a default scope.
pub const USER_PROFILE_REL: &str = "00_user/profile.md";

/// One manifest entry that no longer matches the document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftMismatch {
    pub path: String,
    /// `"missing"` or `"hash mismatch"`.
    pub reason: &'static str,
}

/// The scope the caller should use to shape downstream queries: either
/// supplied explicitly, or (optionally) inferred from the user profile
/// document.
#[derive(Debug, Clone, Default)]
pub struct DeclaredScope {
    pub scope_type: Option<ScopeType>,
    pub scope_id: Option<String>,
    pub user_profile: Option<String>,
}

/// Everything boot produces: the policy text, the manifest, any drift,
/// and the declared scope.
#[derive(Debug, Clone)]
pub struct BootResult {
    pub policy: String,
    pub manifest: Manifest,
    pub mismatches: Vec<DriftMismatch>,
    pub scope: DeclaredScope,
}

/// Runs the four boot steps. `explicit_scope` is the caller-supplied
/// `{scopeType, scopeId}`, if any.
pub fn boot(paths: &IndexPaths, explicit_scope: Option<(ScopeType, String)>) -> Result<BootResult> {
    // Step 1: policy document, fails if absent.
    let policy = fs::read_to_string(paths.policy()).map_err(BrainError::IoFault)?;

    // Step 2: manifest, fails if unreadable or malformed.
    let manifest_content = fs::read_to_string(paths.manifest()).map_err(BrainError::IoFault)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content).map_err(|e| BrainError::SchemaViolation {
        errors: vec![brain_core::validation::ValidationError {
            record_id: None,
            message: format!("manifest failed to parse: {e}"),
        }],
    })?;

    // Step 3: drift check. Collected, never fatal.
    let mut mismatches = Vec::new();
    for entry in &manifest.files {
        let doc_path = paths.document(&entry.path);
        match fs::read(&doc_path) {
            Ok(bytes) => {
                if ContentHash::of_bytes(&bytes) != entry.hash {
                    warn!(path = %entry.path, "hash mismatch against manifest");
                    mismatches.push(DriftMismatch {
                        path: entry.path.clone(),
                        reason: "hash mismatch",
                    });
                }
            }
            Err(_) => {
                warn!(path = %entry.path, "manifest entry missing on disk");
                mismatches.push(DriftMismatch {
                    path: entry.path.clone(),
                    reason: "missing",
                });
            }
        }
    }

    // Step 4: declare scope.
    let scope = if let Some((scope_type, scope_id)) = explicit_scope {
        DeclaredScope {
            scope_type: Some(scope_type),
            scope_id: Some(scope_id),
            user_profile: None,
        }
    } else {
        let profile_path = paths.root.join(USER_PROFILE_REL);
        DeclaredScope {
            scope_type: None,
            scope_id: None,
            user_profile: fs::read_to_string(profile_path).ok(),
        }
    };

    Ok(BootResult {
        policy,
        manifest,
        mismatches,
        scope,
    })
}
