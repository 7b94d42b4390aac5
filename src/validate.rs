// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Gate inbound events on minimal shape before any lookup runs
// role: validation/event
// inputs: Raw inbound JSON event
// outputs: FailureEvent (pipeline, execution id, raw document) or InvalidEventShape
// side_effects: Logs the rejection reason at error level
// invariants:
// - No external calls
// - Detail must be truthy; execution-id must be a non-empty scalar
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::error::InvalidEventShape;
use crate::ext::serde_json::JsonFetch;
use crate::model::FailureEvent;

pub const DETAIL_KEY: &str = "detail";
pub const PIPELINE_KEY: &str = "pipeline";
pub const EXECUTION_ID_KEY: &str = "execution-id";

pub fn validate(event: serde_json::Value) -> Result<FailureEvent, InvalidEventShape> {
  if !event.fetch_key(DETAIL_KEY).is_truthy() {
    tracing::error!("No detail found in event, cannot continue");
    return Err(InvalidEventShape::EmptyDetail);
  }

  // A truthy non-object detail (e.g. a bare string) yields no fields below.
  let detail = &event[DETAIL_KEY];
  let Some(execution_id) = detail
    .fetch_key(EXECUTION_ID_KEY)
    .to_display_string()
    .filter(|id| !id.trim().is_empty())
  else {
    tracing::error!("No execution id found in detail, cannot continue");
    return Err(InvalidEventShape::MissingExecutionId);
  };

  let pipeline = detail.fetch_key(PIPELINE_KEY).to_display_string().unwrap_or_default();

  Ok(FailureEvent {
    pipeline,
    execution_id,
    raw: event,
  })
}
