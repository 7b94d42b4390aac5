// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Open SQS envelopes to reach the pipeline event inside
// role: transport/envelope
// inputs: SQS record list, or a Lambda SQS event object with "Records"
// outputs: The event decoded from the first record's body
// invariants: Only the first record is opened; the decoded event is returned as-is
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::error::EnvelopeError;
use crate::ext::serde_json::JsonFetch;

const RECORDS_KEY: &str = "Records";

fn records(message: &serde_json::Value) -> Option<&Vec<serde_json::Value>> {
  message
    .as_array()
    .or_else(|| message.fetch_key(RECORDS_KEY).value().and_then(|v| v.as_array()))
}

/// True for anything shaped like a queue delivery rather than a bare event.
pub fn is_envelope(message: &serde_json::Value) -> bool {
  records(message).is_some()
}

pub fn open_sqs_envelope(message: &serde_json::Value) -> Result<serde_json::Value, EnvelopeError> {
  let records = records(message).ok_or(EnvelopeError::Empty)?;
  let first = records.first().ok_or(EnvelopeError::Empty)?;

  if records.len() > 1 {
    tracing::warn!(count = records.len(), "queue message holds several records; only the first is enriched");
  }

  let body = first.fetch_key("body").as_str().ok_or(EnvelopeError::MissingBody)?;

  serde_json::from_str(body).map_err(EnvelopeError::InvalidBody)
}
