// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Compose the Slack-flavoured failure notification and attach it to the outbound event
// role: enrichment/message
// inputs: Process name, region, pipeline, resolved revision/author/handle
// outputs: EnrichedNotification; event JSON with message-header and message-content
// invariants:
// - Header is always "<process> failed: <pipeline>"
// - Only message-header/message-content are written; every other key is left as received
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{AuthorEmail, ChatHandle, EnrichedNotification, MessageContent};
use crate::util::short_sha;

pub const HEADER_KEY: &str = "message-header";
pub const CONTENT_KEY: &str = "message-content";
pub const SEVERITY_DANGER: &str = "danger";
pub const MARKUP_TEXT: &str = "text";

pub fn header(process: &str, pipeline: &str) -> String {
  format!("{} failed: {}", process, pipeline)
}

pub fn pipeline_console_url(region: &str, pipeline: &str) -> String {
  format!(
    "https://{}.console.aws.amazon.com/codesuite/codepipeline/pipelines/{}/view",
    region, pipeline
  )
}

pub fn commit_url(repo: &str, sha: &str) -> String {
  format!("https://github.com/{}/commit/{}", repo, sha)
}

/// Inputs gathered by the time every lookup has finished.
pub struct Resolved<'a> {
  pub process: &'a str,
  pub region: &'a str,
  pub pipeline: &'a str,
  pub repo: &'a str,
  pub sha: &'a str,
  pub subject: String,
  pub author_email: AuthorEmail,
  pub chat_handle: ChatHandle,
}

pub fn compose(r: Resolved<'_>) -> EnrichedNotification {
  let pipeline_url = pipeline_console_url(r.region, r.pipeline);
  let commit_url = commit_url(r.repo, r.sha);

  let text = format!(
    "Build of <{}|{}> failed after a commit by <@{}> - <{}|{}>",
    pipeline_url, r.pipeline, r.chat_handle, commit_url, r.subject
  );

  EnrichedNotification {
    header: header(r.process, r.pipeline),
    chat_handle: r.chat_handle,
    author_email: r.author_email,
    commit_summary: r.subject,
    commit_url,
    short_sha: short_sha(r.sha),
    content: MessageContent {
      severity: SEVERITY_DANGER.to_string(),
      markup_fields: vec![MARKUP_TEXT.to_string()],
      text,
    },
  }
}

/// Set the header only (no revision to describe).
pub fn attach_header(event: &mut serde_json::Value, header: &str) {
  if let Some(obj) = event.as_object_mut() {
    obj.insert(HEADER_KEY.into(), serde_json::Value::String(header.to_string()));
  }
}

pub fn attach(event: &mut serde_json::Value, notification: &EnrichedNotification) {
  attach_header(event, &notification.header);

  if let Some(obj) = event.as_object_mut() {
    let content = serde_json::to_value(&notification.content).unwrap_or(serde_json::Value::Null);
    obj.insert(CONTENT_KEY.into(), content);
  }
}
