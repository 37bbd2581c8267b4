//! Clap CLI definitions for the `brain` command.

use clap::{Args, Parser, Subcommand};

/// brain -- a local, transactional memory store for AI agents.
#[derive(Parser, Debug)]
#[command(name = "brain", about = "A local transactional memory store for AI agents", version, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global flags available to every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Root directory of the brain store (default: $BRAIN_ROOT, ~/Brain, or
    /// the nearest ancestor containing Brain/90_index).
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Enable verbose/debug logging.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Print the response contract as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the six category folders and the index artifacts, if absent.
    Init,

    /// Create a new record (a BWT `create` intent).
    Write(WriteArgs),

    /// Patch an existing record's fields and/or content (a BWT `update` intent).
    Update(UpdateArgs),

    /// Mark a record deprecated (a BWT `deprecate` intent).
    Deprecate(DeprecateArgs),

    /// Remove a deprecated record (a BWT `delete` intent, gated).
    Delete(DeleteArgs),

    /// Run the boot sequence: load policy and manifest, check drift, declare scope.
    Boot(BootArgs),

    /// Validate the on-disk store.
    Validate(ValidateArgs),

    /// Query the digest for active records matching a scope and/or goal.
    Query(QueryArgs),

    /// Show the full record for a given id.
    Show(ShowArgs),
}

#[derive(Args, Debug, Clone)]
pub struct WriteArgs {
    /// project | agent | user | topic
    #[arg(long = "scope-type")]
    pub scope_type: String,

    #[arg(long = "scope-id")]
    pub scope_id: String,

    /// rule | decision | profile | log | ref | note | candidate | reminder | project_state
    #[arg(long = "record-type")]
    pub record_type: String,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub summary: String,

    /// Comma-separated `axis/value` tags (e.g. `domain/infra,intent/decision`).
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// user_confirmed | candidate | chat_log | external_doc | inference
    #[arg(long = "source-type")]
    pub source_type: String,

    /// Root-relative path of the document this record indexes.
    #[arg(long = "source-ref")]
    pub source_ref: String,

    /// Document body. Omit to create a record with no document of its own.
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[arg(long = "record-id")]
    pub record_id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub summary: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    #[arg(long = "source-type")]
    pub source_type: Option<String>,

    #[arg(long = "record-type")]
    pub record_type: Option<String>,

    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeprecateArgs {
    #[arg(long = "record-id")]
    pub record_id: String,

    /// A replacement record id, or the literal `obsolete`.
    #[arg(long = "replaced-by")]
    pub replaced_by: String,

    /// Required when `--replaced-by obsolete`.
    #[arg(long = "deprecation-reason")]
    pub deprecation_reason: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[arg(long = "record-id")]
    pub record_id: String,

    /// Confirms the user-confirmation gate (§4.5 delete precondition 4).
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BootArgs {
    /// Explicit scope type to declare, bypassing user-profile inference.
    #[arg(long = "scope-type")]
    pub scope_type: Option<String>,

    #[arg(long = "scope-id", requires = "scope_type")]
    pub scope_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Also run the back-reference detector (check 6).
    #[arg(long)]
    pub full: bool,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[arg(long = "scope-type")]
    pub scope_type: Option<String>,

    #[arg(long = "scope-id")]
    pub scope_id: Option<String>,

    #[arg(long)]
    pub goal: Option<String>,

    #[arg(long = "top-k")]
    pub top_k: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    pub record_id: String,
}
