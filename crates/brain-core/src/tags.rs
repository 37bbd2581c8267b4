//! The `tags.json` index artifact (§3.2) and the `axis/value` tag grammar
//! implied by §3.1 and invariant 6.

use serde::{Deserialize, Serialize};

use crate::enums::TagAxis;

/// `{axes: ["domain", "intent"]}` -- the fixed two-axis declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsDocument {
    pub axes: Vec<String>,
}

impl TagsDocument {
    /// The fixed document written by the initializer (§4.2).
    pub fn fixed() -> Self {
        Self {
            axes: vec![TagAxis::Domain.as_str().to_string(), TagAxis::Intent.as_str().to_string()],
        }
    }
}

/// Splits a tag into its axis and value halves, e.g. `"domain/memory"` →
/// `(Domain, "memory")`. Returns `None` if the tag has no `/`, an empty
/// value, or an axis outside `{domain, intent}` (invariant 6).
pub fn parse_tag(tag: &str) -> Option<(TagAxis, &str)> {
    let (prefix, value) = tag.split_once('/')?;
    if value.is_empty() {
        return None;
    }
    let axis = TagAxis::from_prefix(prefix)?;
    Some((axis, value))
}

/// `true` iff every tag in `tags` parses under [`parse_tag`].
pub fn all_tags_valid<'a>(tags: impl IntoIterator<Item = &'a String>) -> bool {
    tags.into_iter().all(|t| parse_tag(t).is_some())
}
