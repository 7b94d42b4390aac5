// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Named error taxonomy for event validation and every external lookup in the enrichment chain
// role: errors/taxonomy
// outputs: EnrichError plus per-collaborator error enums (secret, pipeline, commit, envelope)
// invariants:
// - Collaborator errors are wrapped with #[from] and never rewritten; the source stays reachable
// - Absent revision and unknown author are not errors and have no variant here
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

/// Inbound event rejected before any external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidEventShape {
  #[error("no detail found in event")]
  EmptyDetail,
  #[error("no execution id found in detail")]
  MissingExecutionId,
}

#[derive(Debug, Error)]
pub enum SecretError {
  #[error("parameter not found: {name}")]
  NotFound { name: String },
  #[error("secret store error ({code}) for {name}: {message}")]
  Service { name: String, code: String, message: String },
  #[error("secret store unavailable: {0}")]
  Transport(String),
}

#[derive(Debug, Error)]
pub enum PipelineLookupError {
  #[error("PipelineNotFoundException: pipeline {pipeline} does not exist")]
  PipelineNotFound { pipeline: String },
  #[error("PipelineExecutionNotFoundException: execution {execution_id} not found in {pipeline}")]
  ExecutionNotFound { pipeline: String, execution_id: String },
  #[error("ThrottlingException: {message}")]
  Throttled { message: String },
  #[error("pipeline API error ({code}): {message}")]
  Service { code: String, message: String },
  #[error("pipeline API unavailable: {0}")]
  Transport(String),
  #[error("malformed pipeline execution response: {0}")]
  Malformed(String),
}

#[derive(Debug, Error)]
pub enum CommitLookupError {
  #[error("repository {repo} not found")]
  RepoNotFound { repo: String },
  #[error("commit {sha} not found in {repo}")]
  CommitNotFound { repo: String, sha: String },
  #[error("source-control host rejected credentials (HTTP {status})")]
  Unauthorized { status: u16 },
  #[error("source-control host returned HTTP {status} for {repo}@{sha}")]
  Status { repo: String, sha: String, status: u16 },
  #[error("source-control host unavailable: {0}")]
  Transport(String),
  #[error("malformed commit response: {0}")]
  Malformed(String),
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
  #[error("queue envelope contains no records")]
  Empty,
  #[error("queue record has no string body")]
  MissingBody,
  #[error("queue record body is not valid JSON: {0}")]
  InvalidBody(#[source] serde_json::Error),
}

/// Everything an invocation can fail with.
#[derive(Debug, Error)]
pub enum EnrichError {
  #[error("invalid event shape: {0}")]
  InvalidEventShape(#[from] InvalidEventShape),
  #[error(transparent)]
  Secret(#[from] SecretError),
  #[error(transparent)]
  PipelineLookup(#[from] PipelineLookupError),
  #[error(transparent)]
  CommitLookup(#[from] CommitLookupError),
  #[error(transparent)]
  Envelope(#[from] EnvelopeError),
  #[error("cannot determine repository for revision url {revision_url:?}")]
  RepositoryUnresolved { revision_url: String },
}

impl EnrichError {
  pub fn is_secret_not_found(&self) -> bool {
    matches!(self, EnrichError::Secret(SecretError::NotFound { .. }))
  }
}
