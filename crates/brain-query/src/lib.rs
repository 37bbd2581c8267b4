//! The digest-first query pipeline (§4.7): filter the digest by scope,
//! keep only active records, score against a goal string, and return
//! the top-k. Detail lookup reads the full record sequence separately.

use brain_core::digest::{self, DigestLine};
use brain_core::jsonl::parse_jsonl_str;
use brain_core::record::Record;
use brain_core::{ScopeType, Status};

/// `{scopeType?, scopeId?, goal?, topK=10}` (§4.7 input).
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    pub scope_type: Option<ScopeType>,
    pub scope_id: Option<String>,
    pub goal: Option<String>,
    pub top_k: Option<usize>,
}

pub const DEFAULT_TOP_K: usize = 10;

/// One scored row in a query response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub record_id: String,
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub status: Status,
    pub score: i64,
}

/// `{candidates[], total}` (§6.2).
#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub candidates: Vec<Candidate>,
    pub total: usize,
}

/// Runs the full pipeline over an already-loaded digest (its parsed
/// lines, so callers control how the file is read).
pub fn query(digest_lines: &[DigestLine], request: &QueryRequest) -> QueryResponse {
    let scoped = digest_lines.iter().filter(|line| matches_scope(line, request));
    let active: Vec<&DigestLine> = scoped.filter(|line| line.status == Status::Active).collect();
    let total = active.len();

    let tokens = goal_tokens(request.goal.as_deref());

    let mut scored: Vec<Candidate> = active
        .into_iter()
        .map(|line| Candidate {
            record_id: line.record_id.clone(),
            title: line.title.clone(),
            summary: line.summary.clone(),
            tags: line.tags.clone(),
            status: line.status,
            score: score_line(line, &tokens),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K);
    scored.truncate(top_k);

    QueryResponse { candidates: scored, total }
}

/// Parses a digest file's contents, then runs [`query`] over it.
pub fn query_digest(digest_content: &str, request: &QueryRequest) -> QueryResponse {
    query(&digest::parse(digest_content), request)
}

/// Detail lookup: reads the full record sequence and returns the record
/// matching `record_id`, or `None`.
pub fn find_record(records_jsonl_content: &str, record_id: &str) -> Option<Record> {
    parse_jsonl_str(records_jsonl_content)
        .ok()?
        .into_iter()
        .find(|r| r.record_id == record_id)
}

fn matches_scope(line: &DigestLine, request: &QueryRequest) -> bool {
    let Some(scope_type) = request.scope_type else {
        return true;
    };
    let abbrev_needle = format!("_{}_", scope_type.abbrev());
    if !line.record_id.contains(&abbrev_needle) {
        return false;
    }
    match &request.scope_id {
        Some(scope_id) => line.record_id.contains(&format!("_{scope_id}_")),
        None => true,
    }
}

fn goal_tokens(goal: Option<&str>) -> Vec<String> {
    goal.map(|g| g.to_lowercase())
        .map(|g| g.split_whitespace().filter(|t| t.chars().count() > 1).map(str::to_string).collect())
        .unwrap_or_default()
}

fn score_line(line: &DigestLine, tokens: &[String]) -> i64 {
    if tokens.is_empty() {
        return 0;
    }
    let title = line.title.to_lowercase();
    let summary = line.summary.to_lowercase();
    let tags = line.tags.join(",").to_lowercase();

    let mut score = 0i64;
    for token in tokens {
        if title.contains(token) {
            score += 3;
        }
        if summary.contains(token) {
            score += 2;
        }
        if tags.contains(token) {
            score += 1;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::record::RecordBuilder;
    use brain_core::RecordType;

    fn rec(id: &str, title: &str, summary: &str, tags: Vec<&str>, status: Status) -> Record {
        RecordBuilder::new_minimal()
            .record_id(id)
            .record_type(RecordType::Decision)
            .title(title)
            .summary(summary)
            .tags(tags.into_iter().map(String::from).collect())
            .status(status)
            .build()
    }

    #[test]
    fn scores_title_highest_for_matching_tokens() {
        let records = vec![
            rec(
                "rec_topic_api_20260727_0001",
                "API 설계 결정",
                "REST API 엔드포인트 구조 결정",
                vec!["domain/infra", "intent/decision"],
                Status::Active,
            ),
            rec(
                "rec_topic_other_20260727_0001",
                "무관한 노트",
                "전혀 다른 내용",
                vec!["domain/misc"],
                Status::Active,
            ),
            rec(
                "rec_topic_other_20260727_0002",
                "또 다른 노트",
                "역시 관련 없음",
                vec!["domain/misc"],
                Status::Active,
            ),
            rec(
                "rec_topic_other_20260727_0003",
                "마지막 노트",
                "마지막 내용",
                vec!["domain/misc"],
                Status::Active,
            ),
        ];
        let lines = digest::project(&records);

        let request = QueryRequest {
            goal: Some("API 설계 엔드포인트".into()),
            ..Default::default()
        };
        let response = query(&lines, &request);

        assert_eq!(response.candidates[0].record_id, "rec_topic_api_20260727_0001");
        assert!(response.candidates[0].score >= 3 + 3 + 2);
    }

    #[test]
    fn no_goal_means_all_scores_zero() {
        let records = vec![rec(
            "rec_topic_api_20260727_0001",
            "title",
            "summary",
            vec!["domain/x"],
            Status::Active,
        )];
        let response = query(&digest::project(&records), &QueryRequest::default());
        assert_eq!(response.candidates[0].score, 0);
    }

    #[test]
    fn deprecated_records_are_excluded() {
        let records = vec![rec(
            "rec_topic_api_20260727_0001",
            "API title",
            "summary",
            vec![],
            Status::Deprecated,
        )];
        let response = query(&digest::project(&records), &QueryRequest::default());
        assert_eq!(response.total, 0);
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn scope_type_filters_by_abbreviation_substring() {
        let records = vec![
            rec("rec_topic_a_20260727_0001", "t", "s", vec![], Status::Active),
            rec("rec_proj_a_20260727_0001", "t", "s", vec![], Status::Active),
        ];
        let request = QueryRequest {
            scope_type: Some(ScopeType::Topic),
            ..Default::default()
        };
        let response = query(&digest::project(&records), &request);
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].record_id, "rec_topic_a_20260727_0001");
    }

    #[test]
    fn top_k_truncates_but_total_counts_all_active() {
        let records: Vec<Record> = (0..15)
            .map(|i| rec(&format!("rec_topic_a_20260727_{i:04}"), "t", "s", vec![], Status::Active))
            .collect();
        let response = query(&digest::project(&records), &QueryRequest::default());
        assert_eq!(response.total, 15);
        assert_eq!(response.candidates.len(), DEFAULT_TOP_K);
    }

    #[test]
    fn find_record_returns_none_for_unknown_id() {
        assert!(find_record("", "rec_topic_a_20260727_0001").is_none());
    }
}
