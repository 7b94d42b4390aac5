// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Value types flowing through one enrichment invocation (event, revision, author, handle, notification)
// role: model/types
// outputs: Serializable structs with stable wire names for the execution response and the outbound message
// invariants: Built fresh per invocation; never mutated after construction; sentinel strings only appear at rendering
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

/// Artifact name given to every GitHub source step.
pub const SOURCE_OUTPUT: &str = "source_output";

/// Rendered in place of an author email when the revision had no commit id.
pub const EMPTY_SHA_SENTINEL: &str = "<not found - empty sha>";

/// Chat handle used when the author is not in the directory.
pub const DEFAULT_CHAT_HANDLE: &str = "telemetry-engineers";

/// A validated failure event. `raw` is the untouched inbound document.
#[derive(Debug, Clone)]
pub struct FailureEvent {
  pub pipeline: String,
  pub execution_id: String,
  pub raw: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub revision_id: String,
  #[serde(default)]
  pub revision_summary: String,
  #[serde(default)]
  pub revision_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecution {
  #[serde(default)]
  pub pipeline_name: Option<String>,
  #[serde(default)]
  pub pipeline_execution_id: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub artifact_revisions: Vec<RevisionInfo>,
}

/// Envelope returned by `get-pipeline-execution`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPipelineExecutionOutput {
  pub pipeline_execution: PipelineExecution,
}

/// What the source-control host tells us about one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
  pub author_email: String,
  pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorEmail {
  Resolved(String),
  EmptySha,
}

impl AuthorEmail {
  pub fn address(&self) -> Option<&str> {
    match self {
      AuthorEmail::Resolved(e) => Some(e.as_str()),
      AuthorEmail::EmptySha => None,
    }
  }

  /// Wire form; the sentinel stands in for a missing sha.
  pub fn as_str(&self) -> &str {
    self.address().unwrap_or(EMPTY_SHA_SENTINEL)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatHandle(String);

impl ChatHandle {
  pub fn new(handle: impl Into<String>) -> Self {
    Self(handle.into())
  }

  pub fn default_team() -> Self {
    Self(DEFAULT_CHAT_HANDLE.to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_default_team(&self) -> bool {
    self.0 == DEFAULT_CHAT_HANDLE
  }
}

impl std::fmt::Display for ChatHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// Body attached under `message-content`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MessageContent {
  pub severity: String,
  pub markup_fields: Vec<String>,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedNotification {
  pub header: String,
  pub chat_handle: ChatHandle,
  pub author_email: AuthorEmail,
  pub commit_summary: String,
  pub commit_url: String,
  pub short_sha: String,
  pub content: MessageContent,
}

/// Host-supplied invocation metadata; both fields are optional.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
  pub request_id: Option<String>,
  pub function_name: Option<String>,
}
