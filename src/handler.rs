// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one enrichment invocation: validate → revision → author → handle → notification
// role: orchestration/handler
// inputs: Inbound event (bare or SQS-wrapped), InvocationContext, injected collaborators
// outputs: The inbound event plus message-header (always) and message-content (when a revision was found)
// side_effects: Up to three serial lookups (execution, secret, commit); tracing output
// invariants:
// - Invalid shapes are rejected before any external call
// - No source_output revision → header-only event, no secret or commit lookup
// - Collaborator errors propagate unmodified; only absent revision and unknown author degrade
// errors: EnrichError with the collaborator's own kind preserved
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::clients::Collaborators;
use crate::enrichment::author::AuthorResolver;
use crate::enrichment::identity::IdentityDirectory;
use crate::enrichment::message::{self, Resolved};
use crate::enrichment::revision::RevisionResolver;
use crate::enrichment::{repository, summary};
use crate::envelope::open_sqs_envelope;
use crate::error::EnrichError;
use crate::model::{ChatHandle, EnrichedNotification, FailureEvent, InvocationContext};
use crate::validate::validate;

pub const SERVICE: &str = "pipeline-failure-enrichment";
pub const DEFAULT_PROCESS_NAME: &str = "CodePipeline";
pub const DEFAULT_REGION: &str = "eu-west-2";
pub const DEFAULT_GITHUB_TOKEN_PARAM: &str = "/secrets/github/telemetry_github_token";

/// Where an invocation is in the enrichment state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Received,
  Validated,
  RevisionResolved,
  RevisionAbsent,
  AuthorResolved,
  HandleResolved,
  Enriched,
  RejectedInvalidShape,
  LookupFailed,
}

impl std::fmt::Display for Stage {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    std::fmt::Debug::fmt(self, f)
  }
}

#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
  pub process_name: String,
  pub region: String,
  pub github_repo: Option<String>,
  pub github_token_param: String,
}

impl Default for EnrichmentSettings {
  fn default() -> Self {
    Self {
      process_name: DEFAULT_PROCESS_NAME.into(),
      region: DEFAULT_REGION.into(),
      github_repo: None,
      github_token_param: DEFAULT_GITHUB_TOKEN_PARAM.into(),
    }
  }
}

/// Result of a successful invocation.
#[derive(Debug)]
pub struct Outcome {
  pub event: serde_json::Value,
  pub stage: Stage,
  pub notification: Option<EnrichedNotification>,
}

pub struct Enricher {
  clients: Collaborators,
  directory: IdentityDirectory,
  settings: EnrichmentSettings,
}

fn transition(stage: Stage) {
  tracing::debug!(%stage, "stage reached");
}

fn lookup_failed<E: Into<EnrichError>>(err: E) -> EnrichError {
  let err = err.into();
  tracing::error!(stage = %Stage::LookupFailed, "{}", err);
  err
}

fn log_context(ctx: &InvocationContext) {
  match &ctx.request_id {
    Some(id) => tracing::info!(function = ctx.function_name.as_deref().unwrap_or("-"), "Lambda Request ID: {}", id),
    None => tracing::info!("No context object available"),
  }
}

impl Enricher {
  pub fn new(clients: Collaborators, directory: IdentityDirectory, settings: EnrichmentSettings) -> Self {
    Self {
      clients,
      directory,
      settings,
    }
  }

  /// Open a queue envelope and enrich the event inside it.
  pub fn enrich_sqs_event(
    &self,
    message: serde_json::Value,
    ctx: &InvocationContext,
  ) -> Result<serde_json::Value, EnrichError> {
    tracing::debug!("Event received from SQS: \"{}\"", message);
    let event = open_sqs_envelope(&message)?;
    self.enrich_codepipeline_event(event, ctx)
  }

  pub fn enrich_codepipeline_event(
    &self,
    event: serde_json::Value,
    ctx: &InvocationContext,
  ) -> Result<serde_json::Value, EnrichError> {
    self.run(event, ctx).map(|o| o.event)
  }

  /// Drive one event through the state machine and report where it ended.
  pub fn run(&self, event: serde_json::Value, ctx: &InvocationContext) -> Result<Outcome, EnrichError> {
    log_context(ctx);
    tracing::debug!("Event received from CodePipeline: \"{}\"", event);
    transition(Stage::Received);

    let FailureEvent {
      pipeline,
      execution_id,
      raw: mut event,
    } = validate(event).map_err(|e| {
      tracing::warn!(stage = %Stage::RejectedInvalidShape, "{}", e);
      EnrichError::from(e)
    })?;

    let span = tracing::info_span!(
      "enrich",
      service = SERVICE,
      request_id = ctx.request_id.as_deref().unwrap_or("-"),
      pipeline = %pipeline,
      execution_id = %execution_id,
    );
    let _entered = span.enter();
    transition(Stage::Validated);

    let header = message::header(&self.settings.process_name, &pipeline);

    let revision = RevisionResolver::new(self.clients.pipeline.as_ref())
      .resolve(&pipeline, &execution_id)
      .map_err(lookup_failed)?;

    let Some(revision) = revision else {
      message::attach_header(&mut event, &header);
      transition(Stage::RevisionAbsent);
      return Ok(Outcome {
        event,
        stage: Stage::RevisionAbsent,
        notification: None,
      });
    };
    transition(Stage::RevisionResolved);

    let sha = revision.revision_id.as_str();
    tracing::debug!("commit_sha: {}", sha);

    let subject = summary::subject(&revision.revision_summary);

    let repo = repository::resolve(self.settings.github_repo.as_deref(), &revision.revision_url).ok_or_else(|| {
      lookup_failed(EnrichError::RepositoryUnresolved {
        revision_url: revision.revision_url.clone(),
      })
    })?;

    let token = self.clients.secrets.get(&self.settings.github_token_param).map_err(lookup_failed)?;

    let author_email = AuthorResolver::new(self.clients.source_control.as_ref())
      .resolve(&token, &repo, sha)
      .map_err(lookup_failed)?;
    transition(Stage::AuthorResolved);

    let chat_handle = author_email
      .address()
      .map(|email| self.directory.lookup(email))
      .unwrap_or_else(ChatHandle::default_team);
    transition(Stage::HandleResolved);

    let notification = message::compose(Resolved {
      process: &self.settings.process_name,
      region: &self.settings.region,
      pipeline: &pipeline,
      repo: &repo,
      sha,
      subject,
      author_email,
      chat_handle,
    });

    message::attach(&mut event, &notification);
    transition(Stage::Enriched);

    tracing::info!(
      chat_handle = %notification.chat_handle,
      author = notification.author_email.as_str(),
      commit = %notification.short_sha,
      "enriched failure notification"
    );
    tracing::debug!("Final enriched event: \"{}\"", event);

    Ok(Outcome {
      event,
      stage: Stage::Enriched,
      notification: Some(notification),
    })
  }
}
