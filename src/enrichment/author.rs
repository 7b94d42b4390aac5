// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve the author email of the commit behind a failed pipeline run
// role: enrichment/author
// inputs: Source-control token, "owner/name" repository, commit sha, SourceControlApi
// outputs: AuthorEmail (resolved address, or EmptySha when there is no sha)
// side_effects: One source-control lookup for a non-empty sha
// invariants:
// - Empty sha short-circuits with no external call
// - Lookup failures for a non-empty sha propagate; no sentinel is substituted
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::clients::SourceControlApi;
use crate::error::CommitLookupError;
use crate::model::AuthorEmail;

pub struct AuthorResolver<'a> {
  api: &'a dyn SourceControlApi,
}

impl<'a> AuthorResolver<'a> {
  pub fn new(api: &'a dyn SourceControlApi) -> Self {
    Self { api }
  }

  pub fn resolve(&self, token: &str, repo: &str, sha: &str) -> Result<AuthorEmail, CommitLookupError> {
    if sha.trim().is_empty() {
      tracing::debug!("empty commit sha; skipping author lookup");
      return Ok(AuthorEmail::EmptySha);
    }

    let commit = self.api.get_commit(token, repo, sha).map_err(|e| {
      tracing::error!(%repo, %sha, "{}", e);
      e
    })?;

    Ok(AuthorEmail::Resolved(commit.author_email))
  }
}
