//! String parsing for the closed enum values accepted on the command
//! line. `brain-core`'s enums are a fixed set with no `Custom` escape
//! hatch (see `enums.rs`), so an unrecognized value is a user error
//! reported here rather than something the engine itself would ever see.

use anyhow::{bail, Result};
use brain_core::{RecordType, ReplacedBy, ScopeType, SourceType};

pub fn scope_type(s: &str) -> Result<ScopeType> {
    Ok(match s {
        "project" => ScopeType::Project,
        "agent" => ScopeType::Agent,
        "user" => ScopeType::User,
        "topic" => ScopeType::Topic,
        other => bail!("unknown scope type {other:?}, expected one of: project, agent, user, topic"),
    })
}

pub fn record_type(s: &str) -> Result<RecordType> {
    Ok(match s {
        "rule" => RecordType::Rule,
        "decision" => RecordType::Decision,
        "profile" => RecordType::Profile,
        "log" => RecordType::Log,
        "ref" => RecordType::Reference,
        "note" => RecordType::Note,
        "candidate" => RecordType::Candidate,
        "reminder" => RecordType::Reminder,
        "project_state" => RecordType::ProjectState,
        other => bail!(
            "unknown record type {other:?}, expected one of: rule, decision, profile, log, ref, note, candidate, reminder, project_state"
        ),
    })
}

pub fn source_type(s: &str) -> Result<SourceType> {
    Ok(match s {
        "user_confirmed" => SourceType::UserConfirmed,
        "candidate" => SourceType::Candidate,
        "chat_log" => SourceType::ChatLog,
        "external_doc" => SourceType::ExternalDoc,
        "inference" => SourceType::Inference,
        other => bail!(
            "unknown source type {other:?}, expected one of: user_confirmed, candidate, chat_log, external_doc, inference"
        ),
    })
}

pub fn replaced_by(s: &str) -> ReplacedBy {
    if s == "obsolete" {
        ReplacedBy::Obsolete
    } else {
        ReplacedBy::RecordId(s.to_string())
    }
}
