// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Decode a revision summary into the one-line commit subject shown in the notification
// role: enrichment/summary
// inputs: revisionSummary string (plain message, or JSON object carrying CommitMessage)
// outputs: First line of the commit message
// invariants: Never fails; anything that is not a JSON object with a string CommitMessage is plain text
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::ext::serde_json::JsonFetch;
use crate::util::first_line;

const COMMIT_MESSAGE_KEY: &str = "CommitMessage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryEncoding {
  /// `{"ProviderType":"GitHub","CommitMessage":"..."}` as produced by CodeStar connections.
  Embedded,
  Plain,
}

/// Full commit message carried by the summary, and how it was encoded.
pub fn decode(summary: &str) -> (String, SummaryEncoding) {
  let embedded = serde_json::from_str::<serde_json::Value>(summary)
    .ok()
    .filter(|v| v.is_object())
    .and_then(|v| v.fetch_key(COMMIT_MESSAGE_KEY).as_str().map(str::to_string));

  match embedded {
    Some(message) => (message, SummaryEncoding::Embedded),
    None => (summary.to_string(), SummaryEncoding::Plain),
  }
}

pub fn subject(summary: &str) -> String {
  let (message, encoding) = decode(summary);
  tracing::debug!(?encoding, "decoded revision summary");
  first_line(&message).to_string()
}
