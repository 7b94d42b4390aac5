// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Env-backed collaborators so the binary can run end-to-end without AWS or GitHub
// role: clients/fixtures
// inputs: PFE_TEST_SECRETS_JSON, PFE_TEST_EXECUTION_JSON, PFE_TEST_EXECUTION_ERROR, PFE_TEST_COMMITS_JSON
// outputs: The same typed results and error kinds as the live adapters
// invariants: Missing fixture data surfaces as the matching not-found error, never as a silent default
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::clients::{codepipeline, github, PipelineApi, SecretStore, SourceControlApi};
use crate::error::{CommitLookupError, PipelineLookupError, SecretError};
use crate::ext::serde_json::JsonFetch;
use crate::model::{CommitRecord, PipelineExecution};

pub const SECRETS_VAR: &str = "PFE_TEST_SECRETS_JSON";
pub const EXECUTION_VAR: &str = "PFE_TEST_EXECUTION_JSON";
pub const EXECUTION_ERROR_VAR: &str = "PFE_TEST_EXECUTION_ERROR";
pub const COMMITS_VAR: &str = "PFE_TEST_COMMITS_JSON";

pub fn env_wants_fixtures() -> bool {
  [SECRETS_VAR, EXECUTION_VAR, EXECUTION_ERROR_VAR, COMMITS_VAR]
    .iter()
    .any(|k| std::env::var_os(k).is_some())
}

fn env_json(var: &str) -> Option<serde_json::Value> {
  let s = std::env::var(var).ok()?;
  serde_json::from_str::<serde_json::Value>(&s).ok()
}

/// `PFE_TEST_SECRETS_JSON` = `{"<name>": "<value>", ...}`.
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
  fn get(&self, name: &str) -> Result<String, SecretError> {
    env_json(SECRETS_VAR)
      .and_then(|m| m.fetch_key(name).as_str().map(str::to_string))
      .ok_or_else(|| SecretError::NotFound { name: name.to_string() })
  }
}

/// `PFE_TEST_EXECUTION_JSON` holds a `get-pipeline-execution` response;
/// `PFE_TEST_EXECUTION_ERROR` holds an error code and wins when both are set.
pub struct EnvPipelineApi;

impl PipelineApi for EnvPipelineApi {
  fn get_execution(&self, pipeline: &str, execution_id: &str) -> Result<PipelineExecution, PipelineLookupError> {
    if let Ok(code) = std::env::var(EXECUTION_ERROR_VAR) {
      return Err(codepipeline::classify(&code, &code, pipeline, execution_id));
    }

    match env_json(EXECUTION_VAR) {
      Some(v) => codepipeline::parse_execution(v),
      None => Err(PipelineLookupError::ExecutionNotFound {
        pipeline: pipeline.to_string(),
        execution_id: execution_id.to_string(),
      }),
    }
  }
}

/// `PFE_TEST_COMMITS_JSON` = `{"<sha>": <GitHub commit JSON>, ...}`.
pub struct EnvGithubApi;

impl SourceControlApi for EnvGithubApi {
  fn get_commit(&self, _token: &str, repo: &str, sha: &str) -> Result<CommitRecord, CommitLookupError> {
    let commits = env_json(COMMITS_VAR).unwrap_or_else(|| serde_json::json!({}));

    match commits.get(sha) {
      Some(commit) => github::parse_commit(commit),
      None => Err(CommitLookupError::CommitNotFound {
        repo: repo.to_string(),
        sha: sha.to_string(),
      }),
    }
  }
}
