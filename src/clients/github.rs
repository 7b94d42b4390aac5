// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub REST commit lookup used to resolve the committer's email
// role: clients/github
// inputs: API base URL, bearer token, "owner/name" repository, commit sha
// outputs: CommitRecord (author email + full message)
// side_effects: One HTTPS GET per call
// invariants:
// - 404 → RepoNotFound, 422 → CommitNotFound, 401/403 → Unauthorized, other statuses keep their code
// - No retries and no caching
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::clients::SourceControlApi;
use crate::error::CommitLookupError;
use crate::ext::serde_json::JsonFetch;
use crate::model::CommitRecord;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "pipeline-failure-enrichment";

pub struct GithubHttpApi {
  api_url: String,
  agent: ureq::Agent,
}

impl GithubHttpApi {
  pub fn new(api_url: &str) -> Self {
    Self {
      api_url: api_url.trim_end_matches('/').to_string(),
      agent: ureq::AgentBuilder::new().build(),
    }
  }

  fn commit_url(&self, repo: &str, sha: &str) -> String {
    format!("{}/repos/{}/commits/{}", self.api_url, repo, sha)
  }
}

impl SourceControlApi for GithubHttpApi {
  fn get_commit(&self, token: &str, repo: &str, sha: &str) -> Result<CommitRecord, CommitLookupError> {
    let url = self.commit_url(repo, sha);
    tracing::debug!(%url, "fetching commit from GitHub");

    let response = self
      .agent
      .get(&url)
      .set("Accept", "application/vnd.github+json")
      .set("User-Agent", USER_AGENT)
      .set("Authorization", &format!("Bearer {}", token))
      .call();

    match response {
      Ok(resp) => {
        let body: serde_json::Value = resp
          .into_json()
          .map_err(|e| CommitLookupError::Malformed(e.to_string()))?;
        parse_commit(&body)
      }
      Err(ureq::Error::Status(status, _)) => Err(classify_status(status, repo, sha)),
      Err(ureq::Error::Transport(t)) => Err(CommitLookupError::Transport(t.to_string())),
    }
  }
}

pub fn classify_status(status: u16, repo: &str, sha: &str) -> CommitLookupError {
  match status {
    401 | 403 => CommitLookupError::Unauthorized { status },
    404 => CommitLookupError::RepoNotFound { repo: repo.to_string() },
    422 => CommitLookupError::CommitNotFound {
      repo: repo.to_string(),
      sha: sha.to_string(),
    },
    _ => CommitLookupError::Status {
      repo: repo.to_string(),
      sha: sha.to_string(),
      status,
    },
  }
}

/// Map a GitHub commit document onto a CommitRecord.
pub fn parse_commit(body: &serde_json::Value) -> Result<CommitRecord, CommitLookupError> {
  let author_email = body
    .fetch("commit.author.email")
    .as_str()
    .ok_or_else(|| CommitLookupError::Malformed("commit.author.email missing".into()))?;

  Ok(CommitRecord {
    author_email: author_email.to_string(),
    message: body.fetch("commit.message").to_or_default::<String>(),
  })
}
