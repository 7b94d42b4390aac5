// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Static GitHub committer email → Slack handle directory
// role: enrichment/identity
// inputs: Committer email string
// outputs: ChatHandle (known member or the team default)
// invariants: Pure lookup; unknown emails resolve to "telemetry-engineers" and never error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;

use crate::model::ChatHandle;

/// GitHub commit emails of the team, mapped to Slack handles.
const GITHUB_TO_SLACK: &[(&str, &str)] = &[
  ("1422984+webit4me@users.noreply.github.com", "ali.bahman"),
  ("abn@webit4.me", "ali.bahman"),
  ("gavD@users.noreply.github.com", "gavin.davies1"),
  ("22219356+matthew-hollick@users.noreply.github.com", "matthew.hollick"),
  ("ma3574@users.noreply.github.com", "muhammed.ahmed"),
  ("66684341+rizinaa99@users.noreply.github.com", "rizina.khatun"),
  ("Crumplepang@users.noreply.github.com", "rob.white"),
  ("18111914+sjpalf@users.noreply.github.com", "stephen.palfreyman"),
  ("67912934+TimothyFothergill@users.noreply.github.com", "timothy.fothergill"),
];

#[derive(Debug, Clone)]
pub struct IdentityDirectory {
  entries: HashMap<String, String>,
}

impl IdentityDirectory {
  pub fn builtin() -> Self {
    Self::from_entries(GITHUB_TO_SLACK.iter().copied())
  }

  pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
    Self {
      entries: entries
        .into_iter()
        .map(|(email, handle)| (email.to_string(), handle.to_string()))
        .collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Exact-match lookup; anything unknown goes to the team handle.
  pub fn lookup(&self, email: &str) -> ChatHandle {
    let handle = self
      .entries
      .get(email)
      .map(ChatHandle::new)
      .unwrap_or_else(ChatHandle::default_team);

    tracing::debug!("Returned Slack handle {} for GitHub email {}", handle, email);

    handle
  }
}

impl Default for IdentityDirectory {
  fn default() -> Self {
    Self::builtin()
  }
}
