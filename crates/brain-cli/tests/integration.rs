//! End-to-end CLI integration tests for the `brain` binary.
//!
//! Each test initializes a fresh store in its own temp directory and
//! drives the `brain` binary as a subprocess via `assert_cmd`, covering
//! the literal end-to-end scenarios of the write/validate/query surface.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn brain() -> Command {
    Command::cargo_bin("brain").unwrap()
}

fn init_store() -> TempDir {
    let tmp = TempDir::new().unwrap();
    brain().args(["--root", tmp.path().to_str().unwrap(), "init"]).assert().success();
    tmp
}

fn root_args(tmp: &TempDir) -> Vec<String> {
    vec!["--root".to_string(), tmp.path().to_str().unwrap().to_string()]
}

#[test]
fn init_creates_the_category_folders_and_index_artifacts() {
    let tmp = init_store();
    for folder in ["00_user", "10_projects", "20_agents", "30_topics", "90_index", "99_policy"] {
        assert!(tmp.path().join(folder).is_dir(), "missing folder {folder}");
    }
    assert!(tmp.path().join("90_index/records.jsonl").is_file());
    assert!(tmp.path().join("90_index/manifest.json").is_file());
    assert!(tmp.path().join("90_index/records_digest.txt").is_file());
    assert!(tmp.path().join("99_policy/brainPolicy.md").is_file());
}

#[test]
fn init_is_idempotent_and_never_overwrites() {
    let tmp = init_store();
    std::fs::write(tmp.path().join("99_policy/brainPolicy.md"), "custom policy").unwrap();

    let mut args = root_args(&tmp);
    args.push("init".into());
    brain().args(&args).assert().success();

    let policy = std::fs::read_to_string(tmp.path().join("99_policy/brainPolicy.md")).unwrap();
    assert_eq!(policy, "custom policy");
}

#[test]
fn write_then_show_round_trips_a_record() {
    let tmp = init_store();
    let mut args = root_args(&tmp);
    args.extend(
        [
            "write",
            "--scope-type",
            "topic",
            "--scope-id",
            "v2-test",
            "--record-type",
            "note",
            "--title",
            "V2 검증 노트",
            "--summary",
            "BWT V2 체크리스트 검증",
            "--tags",
            "domain/memory,intent/debug",
            "--source-type",
            "candidate",
            "--source-ref",
            "30_topics/v2-test/notes.md",
            "--content",
            "# V2 테스트\nBWT 검증용 문서",
            "--json",
        ]
        .map(String::from),
    );
    let output = brain().args(&args).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["success"], true);
    let record_id = response["recordId"].as_str().unwrap().to_string();
    assert!(record_id.starts_with("rec_topic_v2-test_"));

    let doc = std::fs::read_to_string(tmp.path().join("30_topics/v2-test/notes.md")).unwrap();
    assert!(doc.contains("BWT 검증용 문서"));

    let mut show_args = root_args(&tmp);
    show_args.extend(["show".to_string(), record_id.clone(), "--json".to_string()]);
    let show_output = brain().args(&show_args).output().unwrap();
    assert!(show_output.status.success());
    let record: serde_json::Value = serde_json::from_slice(&show_output.stdout).unwrap();
    assert_eq!(record["recordId"], record_id);
    assert_eq!(record["status"], "active");

    // No residue or backups survive a successful commit.
    let index_dir = tmp.path().join("90_index");
    for entry in std::fs::read_dir(index_dir).unwrap() {
        let path = entry.unwrap().path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        assert_ne!(ext, "tmp");
        assert_ne!(ext, "bak");
    }
}

#[test]
fn update_of_unknown_id_fails_and_leaves_the_store_untouched() {
    let tmp = init_store();
    let records_before = std::fs::read_to_string(tmp.path().join("90_index/records.jsonl")).unwrap();

    let mut args = root_args(&tmp);
    args.extend(
        [
            "update",
            "--record-id",
            "rec_topic_nonexistent_20260101_9999",
            "--content",
            "실패 테스트",
        ]
        .map(String::from),
    );
    brain().args(&args).assert().failure();

    let records_after = std::fs::read_to_string(tmp.path().join("90_index/records.jsonl")).unwrap();
    assert_eq!(records_before, records_after);
}

#[test]
fn manual_edit_is_detected_as_drift_on_boot() {
    let tmp = init_store();
    let mut write_args = root_args(&tmp);
    write_args.extend(
        [
            "write",
            "--scope-type",
            "topic",
            "--scope-id",
            "drift",
            "--record-type",
            "note",
            "--title",
            "t",
            "--summary",
            "s",
            "--source-type",
            "candidate",
            "--source-ref",
            "30_topics/drift/notes.md",
            "--content",
            "original",
        ]
        .map(String::from),
    );
    brain().args(&write_args).assert().success();

    std::fs::write(tmp.path().join("30_topics/drift/notes.md"), "tampered").unwrap();

    let mut boot_args = root_args(&tmp);
    boot_args.extend(["boot".to_string(), "--json".to_string()]);
    let output = brain().args(&boot_args).output().unwrap();
    assert!(output.status.success());
    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let mismatches = response["mismatches"].as_array().unwrap();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0]["reason"], "hash mismatch");
}

#[test]
fn query_scores_title_match_highest() {
    let tmp = init_store();
    let rows = [
        ("api", "API 설계 결정", "REST API 엔드포인트 구조 결정", "domain/infra,intent/decision"),
        ("n1", "무관한 노트", "전혀 다른 내용", "domain/misc"),
        ("n2", "또 다른 노트", "역시 관련 없음", "domain/misc"),
        ("n3", "마지막 노트", "마지막 내용", "domain/misc"),
    ];
    for (scope_id, title, summary, tags) in rows {
        let mut args = root_args(&tmp);
        args.extend(
            [
                "write",
                "--scope-type",
                "topic",
                "--scope-id",
                scope_id,
                "--record-type",
                "note",
                "--title",
                title,
                "--summary",
                summary,
                "--tags",
                tags,
                "--source-type",
                "candidate",
                "--source-ref",
                &format!("30_topics/{scope_id}/notes.md"),
                "--content",
                "body",
            ]
            .map(String::from),
        );
        brain().args(&args).assert().success();
    }

    let mut query_args = root_args(&tmp);
    query_args.extend(["query".to_string(), "--goal".to_string(), "API 설계 엔드포인트".to_string(), "--json".to_string()]);
    let output = brain().args(&query_args).output().unwrap();
    assert!(output.status.success());
    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let candidates = response["candidates"].as_array().unwrap();
    assert!(candidates[0]["title"].as_str().unwrap().contains("API"));
    assert!(candidates[0]["score"].as_i64().unwrap() >= 3 + 3 + 2);
}

#[test]
fn residue_blocks_the_next_write() {
    let tmp = init_store();
    std::fs::write(tmp.path().join("90_index/records.jsonl.tmp"), b"").unwrap();

    let mut args = root_args(&tmp);
    args.extend(
        [
            "write",
            "--scope-type",
            "topic",
            "--scope-id",
            "v2-test",
            "--record-type",
            "note",
            "--title",
            "t",
            "--summary",
            "s",
            "--source-type",
            "candidate",
            "--source-ref",
            "30_topics/v2-test/notes.md",
        ]
        .map(String::from),
    );
    brain()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("residue"));

    let records = std::fs::read_to_string(tmp.path().join("90_index/records.jsonl")).unwrap();
    assert!(records.is_empty());
}

#[test]
fn delete_requires_prior_deprecation_and_confirmation() {
    let tmp = init_store();
    let mut write_args = root_args(&tmp);
    write_args.extend(
        [
            "write",
            "--scope-type",
            "topic",
            "--scope-id",
            "v2-test",
            "--record-type",
            "note",
            "--title",
            "t",
            "--summary",
            "s",
            "--source-type",
            "candidate",
            "--source-ref",
            "30_topics/v2-test/notes.md",
            "--json",
        ]
        .map(String::from),
    );
    let output = brain().args(&write_args).output().unwrap();
    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let record_id = response["recordId"].as_str().unwrap().to_string();

    // Delete before deprecation is rejected by the gate (not deprecated,
    // no replacedBy, and no confirmation at all).
    let mut delete_args = root_args(&tmp);
    delete_args.extend(["delete".to_string(), "--record-id".to_string(), record_id.clone()]);
    brain().args(&delete_args).assert().failure();

    // Deprecating without confirming the delete still blocks it.
    let mut deprecate_args = root_args(&tmp);
    deprecate_args.extend(
        [
            "deprecate".to_string(),
            "--record-id".to_string(),
            record_id.clone(),
            "--replaced-by".to_string(),
            "obsolete".to_string(),
            "--deprecation-reason".to_string(),
            "superseded".to_string(),
        ],
    );
    brain().args(&deprecate_args).assert().success();

    brain().args(&delete_args).assert().failure();

    // Each CLI invocation is its own session: a deprecation committed in
    // an earlier process call has an `updatedAt` strictly before this
    // later invocation's session start, so the confirmed delete now
    // passes every precondition.
    let mut confirmed_delete_args = delete_args.clone();
    confirmed_delete_args.push("--confirm".to_string());
    brain().args(&confirmed_delete_args).assert().success();

    let records = std::fs::read_to_string(tmp.path().join("90_index/records.jsonl")).unwrap();
    assert!(!records.contains(&record_id));
}

#[test]
fn validate_full_flags_a_back_reference_to_a_deprecated_record() {
    let tmp = init_store();

    let mut write_a = root_args(&tmp);
    write_a.extend(
        [
            "write",
            "--scope-type",
            "topic",
            "--scope-id",
            "v7-target",
            "--record-type",
            "note",
            "--title",
            "target",
            "--summary",
            "the original note",
            "--source-type",
            "candidate",
            "--source-ref",
            "30_topics/v7-target/notes.md",
            "--json",
        ]
        .map(String::from),
    );
    let output_a = brain().args(&write_a).output().unwrap();
    let response_a: serde_json::Value = serde_json::from_slice(&output_a.stdout).unwrap();
    let id_a = response_a["recordId"].as_str().unwrap().to_string();

    let mut write_b = root_args(&tmp);
    write_b.extend(
        [
            "write".to_string(),
            "--scope-type".to_string(),
            "topic".to_string(),
            "--scope-id".to_string(),
            "v7-follow".to_string(),
            "--record-type".to_string(),
            "note".to_string(),
            "--title".to_string(),
            "follow-up".to_string(),
            "--summary".to_string(),
            format!("see also {id_a}"),
            "--source-type".to_string(),
            "candidate".to_string(),
            "--source-ref".to_string(),
            "30_topics/v7-follow/notes.md".to_string(),
        ],
    );
    brain().args(&write_b).assert().success();

    let mut deprecate_args = root_args(&tmp);
    deprecate_args.extend(
        [
            "deprecate".to_string(),
            "--record-id".to_string(),
            id_a,
            "--replaced-by".to_string(),
            "obsolete".to_string(),
            "--deprecation-reason".to_string(),
            "테스트".to_string(),
        ],
    );
    brain().args(&deprecate_args).assert().success();

    let mut validate_args = root_args(&tmp);
    validate_args.extend(["validate".to_string(), "--full".to_string()]);
    brain()
        .args(&validate_args)
        .assert()
        .success()
        .stdout(predicate::str::contains("still references deprecated record"));
}
