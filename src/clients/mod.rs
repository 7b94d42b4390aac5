// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Trait seams for the three external collaborators and the factory that picks live or fixture backends
// role: clients/namespace
// inputs: EffectiveConfig; PFE_TEST_* env vars select fixture backends
// outputs: Collaborators bundle of boxed trait objects injected into the Enricher
// invariants:
// - Adapters never retry on their own; transport defaults apply
// - Errors are classified into named kinds and returned, never swallowed
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod aws_cli;
pub mod codepipeline;
pub mod fixtures;
pub mod github;
pub mod ssm;

use crate::cli::EffectiveConfig;
use crate::error::{CommitLookupError, PipelineLookupError, SecretError};
use crate::model::{CommitRecord, PipelineExecution};

pub trait SecretStore {
  fn get(&self, name: &str) -> Result<String, SecretError>;
}

pub trait PipelineApi {
  fn get_execution(&self, pipeline: &str, execution_id: &str) -> Result<PipelineExecution, PipelineLookupError>;
}

pub trait SourceControlApi {
  fn get_commit(&self, token: &str, repo: &str, sha: &str) -> Result<CommitRecord, CommitLookupError>;
}

/// Process-wide client handles, read-only after construction.
pub struct Collaborators {
  pub secrets: Box<dyn SecretStore>,
  pub pipeline: Box<dyn PipelineApi>,
  pub source_control: Box<dyn SourceControlApi>,
}

pub fn build_collaborators(cfg: &EffectiveConfig) -> Collaborators {
  if fixtures::env_wants_fixtures() {
    tracing::warn!("PFE_TEST_* variables set; using fixture-backed collaborators");
    return Collaborators {
      secrets: Box::new(fixtures::EnvSecretStore),
      pipeline: Box::new(fixtures::EnvPipelineApi),
      source_control: Box::new(fixtures::EnvGithubApi),
    };
  }

  let aws = aws_cli::AwsCli::new(&cfg.aws_cli, &cfg.region);

  Collaborators {
    secrets: Box::new(ssm::AwsSsmSecretStore::new(aws.clone())),
    pipeline: Box::new(codepipeline::AwsCodePipelineApi::new(aws)),
    source_control: Box::new(github::GithubHttpApi::new(&cfg.github_api_url)),
  }
}
