//! The `records_digest.txt` index artifact (§3.2, §6.1) -- a deterministic
//! pipe-delimited projection of the records sequence, used as the fast
//! scan surface for queries (§4.7). It is derived, never hand-maintained
//! (§9 design note): [`project`] is the single source of truth for the
//! projection, and both the BWT engine's digest-staging step and the
//! query engine call it (directly or by re-parsing the file it wrote).

use crate::enums::Status;
use crate::record::Record;

/// The three fixed header lines written at the top of every digest file.
pub const HEADER_LINES: [&str; 3] = [
    "# brain records digest",
    "# generated by the BWT engine -- do not hand-edit",
    "# recordId | title | summary | tags | status",
];

/// One projected digest row: `{recordId, title, summary, tags, status}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestLine {
    pub record_id: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub status: Status,
}

fn status_str(status: Status) -> &'static str {
    match status {
        Status::Active => "active",
        Status::Deprecated => "deprecated",
        Status::Archived => "archived",
    }
}

impl DigestLine {
    /// Projects a single record into its digest row.
    pub fn from_record(record: &Record) -> Self {
        Self {
            record_id: record.record_id.clone(),
            title: record.title.clone(),
            summary: record.summary.clone(),
            tags: record.tags.clone(),
            status: record.status,
        }
    }

    /// Formats the exact line written to `records_digest.txt` (§6.1):
    /// `recordId | title | summary | tag1,tag2 | status`.
    pub fn format_line(&self) -> String {
        format!(
            "{} | {} | {} | {} | {}",
            self.record_id,
            self.title,
            self.summary,
            self.tags.join(","),
            status_str(self.status)
        )
    }

    /// Parses one data line back into a [`DigestLine`]. Returns `None` if
    /// the line does not have exactly five pipe-separated fields.
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        let [record_id, title, summary, tags, status] = parts.as_slice() else {
            return None;
        };
        let status = match *status {
            "active" => Status::Active,
            "deprecated" => Status::Deprecated,
            "archived" => Status::Archived,
            _ => return None,
        };
        let tags = if tags.is_empty() {
            Vec::new()
        } else {
            tags.split(',').map(str::to_string).collect()
        };
        Some(Self {
            record_id: record_id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            tags,
            status,
        })
    }
}

/// Projects the full records sequence into digest lines, preserving order
/// (§3.2, §3.3 invariant 3).
pub fn project(records: &[Record]) -> Vec<DigestLine> {
    records.iter().map(DigestLine::from_record).collect()
}

/// Renders the complete digest file contents: the three header lines
/// followed by one data line per record, in order.
pub fn render(records: &[Record]) -> String {
    let mut out = String::new();
    for header in HEADER_LINES {
        out.push_str(header);
        out.push('\n');
    }
    for line in project(records) {
        out.push_str(&line.format_line());
        out.push('\n');
    }
    out
}

/// Parses a digest file's contents back into its data rows, skipping
/// blank lines and lines starting with `#` (§4.7 step 1).
pub fn parse(content: &str) -> Vec<DigestLine> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .filter_map(DigestLine::parse_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordBuilder;

    fn rec(id: &str, status: Status) -> Record {
        RecordBuilder::new_minimal()
            .record_id(id)
            .title("API 설계 결정")
            .summary("REST API 엔드포인트 구조 결정")
            .tags(vec!["domain/infra".into(), "intent/decision".into()])
            .status(status)
            .build()
    }

    #[test]
    fn render_then_parse_is_a_pure_projection() {
        let records = vec![
            rec("rec_topic_a_20260727_0001", Status::Active),
            rec("rec_topic_a_20260727_0002", Status::Deprecated),
        ];
        let rendered = render(&records);
        assert_eq!(rendered.lines().take(3).collect::<Vec<_>>(), HEADER_LINES);

        let parsed = parse(&rendered);
        let direct = project(&records);
        assert_eq!(parsed, direct);
    }

    #[test]
    fn format_line_matches_exact_layout() {
        let line = DigestLine {
            record_id: "rec_topic_a_20260727_0001".into(),
            title: "T".into(),
            summary: "S".into(),
            tags: vec!["domain/x".into(), "intent/y".into()],
            status: Status::Active,
        };
        assert_eq!(
            line.format_line(),
            "rec_topic_a_20260727_0001 | T | S | domain/x,intent/y | active"
        );
    }

    #[test]
    fn parse_skips_header_and_blank_lines() {
        let content = "# h1\n# h2\n# h3\n\nrec_topic_a_20260727_0001 | T | S | | active\n";
        let parsed = parse(content);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].record_id, "rec_topic_a_20260727_0001");
        assert!(parsed[0].tags.is_empty());
    }
}
