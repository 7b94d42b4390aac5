// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Find the source revision that triggered a pipeline execution
// role: enrichment/revision
// inputs: Pipeline name, execution id, PipelineApi
// outputs: Some(RevisionInfo) for the first "source_output" artifact, None when there is none
// invariants:
// - First match wins; list order is otherwise not interpreted
// - Lookup errors propagate unchanged; absence is not an error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::clients::PipelineApi;
use crate::error::PipelineLookupError;
use crate::model::{RevisionInfo, SOURCE_OUTPUT};

pub struct RevisionResolver<'a> {
  api: &'a dyn PipelineApi,
}

impl<'a> RevisionResolver<'a> {
  pub fn new(api: &'a dyn PipelineApi) -> Self {
    Self { api }
  }

  pub fn resolve(&self, pipeline: &str, execution_id: &str) -> Result<Option<RevisionInfo>, PipelineLookupError> {
    let execution = self.api.get_execution(pipeline, execution_id).map_err(|e| {
      tracing::error!(%pipeline, %execution_id, "{}", e);
      e
    })?;

    let revision = select_source_revision(execution.artifact_revisions);

    match &revision {
      Some(r) => tracing::debug!(commit_sha = %r.revision_id, "found source_output revision"),
      None => tracing::info!(%pipeline, %execution_id, "execution has no source_output revision"),
    }

    Ok(revision)
  }
}

pub fn select_source_revision(revisions: Vec<RevisionInfo>) -> Option<RevisionInfo> {
  revisions.into_iter().find(|r| r.name == SOURCE_OUTPUT)
}
