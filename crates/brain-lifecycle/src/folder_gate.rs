//! The folder auto-create gate (§3.3 invariant 7): a pure predicate a
//! caller can pre-check before submitting a `create` intent. The BWT
//! engine enforces the same rule at step 4; this is the standalone
//! version for callers that want to validate ahead of time.

/// `true` iff a new top-level folder may be auto-created for
/// `source_ref` -- only paths under `30_topics/` qualify.
pub fn allows_auto_create(source_ref: &str) -> bool {
    source_ref.starts_with("30_topics/")
}
