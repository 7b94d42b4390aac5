use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::clients::github::DEFAULT_API_URL;
use crate::enrichment::repository::is_repository_id;
use crate::handler::{EnrichmentSettings, DEFAULT_GITHUB_TOKEN_PARAM, DEFAULT_PROCESS_NAME, DEFAULT_REGION};
use crate::model::InvocationContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum EnvelopeMode {
  /// Unwrap when the input looks like a queue delivery
  Auto,
  /// Input is the pipeline event itself
  Direct,
  /// Input is an SQS record list or Records object
  Sqs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum LogFormat {
  Text,
  Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "pipeline-failure-enrichment",
    version,
    about = "Enrich a CodePipeline failure event with the committer's chat handle",
    long_about = None
)]
pub struct Cli {
  /// Event JSON file ("-" reads stdin)
  #[arg(long, default_value = "-")]
  pub event: String,

  /// Where to write the enriched event ("-" writes stdout)
  #[arg(long, default_value = "-")]
  pub out: String,

  /// How to treat the input document
  #[arg(long, value_enum, default_value_t = EnvelopeMode::Auto)]
  pub envelope: EnvelopeMode,

  /// AWS region for the pipeline console link and AWS CLI calls
  #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
  pub region: String,

  /// SSM parameter holding the GitHub token
  #[arg(long, env = "GITHUB_TOKEN_PARAM", default_value = DEFAULT_GITHUB_TOKEN_PARAM)]
  pub github_token_param: String,

  /// Repository as owner/name; derived from the revision URL when unset.
  /// Prefixed so a CI runner's own GITHUB_REPOSITORY is never picked up.
  #[arg(long, env = "PFE_GITHUB_REPOSITORY")]
  pub github_repo: Option<String>,

  /// GitHub REST API base URL
  #[arg(long, env = "PFE_GITHUB_API_URL", default_value = DEFAULT_API_URL)]
  pub github_api_url: String,

  /// Name used in the message header ("<process> failed: <pipeline>")
  #[arg(long, env = "PROCESS_NAME", default_value = DEFAULT_PROCESS_NAME)]
  pub process_name: String,

  /// AWS CLI executable
  #[arg(long, env = "AWS_CLI", default_value = "aws")]
  pub aws_cli: String,

  /// Log filter (e.g. debug, info, pipeline_failure_enrichment=trace)
  #[arg(long, env = "LOG_LEVEL", default_value = "debug")]
  pub log_level: String,

  #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
  pub log_format: LogFormat,

  /// Invocation request id, logged with every line
  #[arg(long, env = "AWS_LAMBDA_REQUEST_ID")]
  pub request_id: Option<String>,

  #[arg(long, env = "AWS_LAMBDA_FUNCTION_NAME")]
  pub function_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub event: String,
  pub out: String,
  pub envelope: EnvelopeMode,
  pub region: String,
  pub github_token_param: String,
  pub github_repo: Option<String>,
  pub github_api_url: String,
  pub process_name: String,
  pub aws_cli: String,
  pub log_level: String,
  pub log_format: LogFormat,
  pub request_id: Option<String>,
  pub function_name: Option<String>,
}

impl EffectiveConfig {
  pub fn settings(&self) -> EnrichmentSettings {
    EnrichmentSettings {
      process_name: self.process_name.clone(),
      region: self.region.clone(),
      github_repo: self.github_repo.clone(),
      github_token_param: self.github_token_param.clone(),
    }
  }

  pub fn context(&self) -> InvocationContext {
    InvocationContext {
      request_id: self.request_id.clone(),
      function_name: self.function_name.clone(),
    }
  }
}

fn non_empty(s: Option<String>) -> Option<String> {
  s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let region = cli.region.trim().to_string();

  if region.is_empty() || !region.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
    bail!("Invalid --region {:?}: expected an AWS region such as eu-west-2", cli.region)
  }

  if cli.github_token_param.trim().is_empty() {
    bail!("--github-token-param must name an SSM parameter")
  }

  let github_repo = non_empty(cli.github_repo);

  if let Some(repo) = &github_repo {
    if !is_repository_id(repo) {
      bail!("Invalid --github-repo {:?}: expected owner/name", repo)
    }
  }

  Ok(EffectiveConfig {
    event: cli.event,
    out: cli.out,
    envelope: cli.envelope,
    region,
    github_token_param: cli.github_token_param.trim().to_string(),
    github_repo,
    github_api_url: cli.github_api_url,
    process_name: cli.process_name,
    aws_cli: cli.aws_cli,
    log_level: cli.log_level,
    log_format: cli.log_format,
    request_id: non_empty(cli.request_id),
    function_name: non_empty(cli.function_name),
  })
}
