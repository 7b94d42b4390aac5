// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Decide which "owner/name" repository a revision belongs to
// role: enrichment/repository
// inputs: Configured repository (optional), revision URL
// outputs: "owner/name" or None
// invariants:
// - Configuration wins over anything derived from the URL
// - URL fallbacks: FullRepositoryId query parameter, then github.com/{owner}/{name}/commit/{sha}
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;
use url::Url;

const FULL_REPOSITORY_ID: &str = "FullRepositoryId";

static RE_REPOSITORY: Lazy<regex::Regex> =
  Lazy::new(|| regex::Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("static regex"));

/// `owner/name` with GitHub's allowed characters.
pub fn is_repository_id(s: &str) -> bool {
  RE_REPOSITORY.is_match(s)
}

pub fn resolve(configured: Option<&str>, revision_url: &str) -> Option<String> {
  if let Some(repo) = configured.filter(|r| !r.is_empty()) {
    return Some(repo.to_string());
  }

  let url = Url::parse(revision_url).ok()?;

  from_query(&url).or_else(|| from_commit_path(&url))
}

/// CodeStar connection redirect URLs carry `FullRepositoryId=owner/name`.
fn from_query(url: &Url) -> Option<String> {
  url
    .query_pairs()
    .find(|(k, _)| k == FULL_REPOSITORY_ID)
    .map(|(_, v)| v.into_owned())
    .filter(|v| is_repository_id(v))
}

fn from_commit_path(url: &Url) -> Option<String> {
  if url.host_str() != Some("github.com") {
    return None;
  }

  let segments: Vec<&str> = url.path_segments()?.collect();

  match segments.as_slice() {
    [owner, name, "commit", ..] => Some(format!("{}/{}", owner, name)).filter(|r| is_repository_id(r)),
    _ => None,
  }
}
