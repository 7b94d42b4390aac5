// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Invoke the AWS CLI for JSON-returning API calls and classify its failures by service error code
// role: clients/aws-cli
// inputs: CLI program path, region, service/operation args
// outputs: Parsed JSON on success; AwsCliError with the service error code on failure
// side_effects: Spawns the AWS CLI subprocess
// invariants:
// - Retries are the CLI's own: standard mode, 60 max attempts
// - Output is always requested as JSON in the configured region
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;

use crate::util::run_command;

pub const RETRY_MODE: &str = "standard";
pub const MAX_ATTEMPTS: &str = "60";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwsCliError {
  /// The CLI could not be started.
  Spawn(String),
  /// The CLI ran and reported a service or client error.
  Failed { code: Option<String>, message: String },
  /// The CLI succeeded but printed something that is not JSON.
  BadOutput(String),
}

impl std::fmt::Display for AwsCliError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AwsCliError::Spawn(m) => write!(f, "failed to run aws cli: {}", m),
      AwsCliError::Failed { code: Some(c), message } => write!(f, "{}: {}", c, message),
      AwsCliError::Failed { code: None, message } => f.write_str(message),
      AwsCliError::BadOutput(m) => write!(f, "unparseable aws cli output: {}", m),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AwsCli {
  program: String,
  region: String,
}

impl AwsCli {
  pub fn new(program: &str, region: &str) -> Self {
    Self {
      program: program.to_string(),
      region: region.to_string(),
    }
  }

  /// Run `aws <args> --region <region> --output json`.
  pub fn call(&self, args: &[&str]) -> Result<serde_json::Value, AwsCliError> {
    let mut full: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    full.extend(["--region".into(), self.region.clone(), "--output".into(), "json".into()]);

    tracing::debug!(program = %self.program, args = ?full, "calling aws cli");

    let out = run_command(
      &self.program,
      &full,
      &[("AWS_RETRY_MODE", RETRY_MODE), ("AWS_MAX_ATTEMPTS", MAX_ATTEMPTS), ("AWS_PAGER", "")],
    )
    .map_err(|e| AwsCliError::Spawn(e.to_string()))?;

    if !out.success {
      let (code, message) = parse_error(&out.stderr);
      tracing::error!(code = code.as_deref().unwrap_or("unknown"), "{}", message);
      return Err(AwsCliError::Failed { code, message });
    }

    serde_json::from_str(&out.stdout).map_err(|e| AwsCliError::BadOutput(e.to_string()))
  }
}

/// Pull `(code, message)` out of the CLI's
/// `An error occurred (Code) when calling the Op operation: message` line.
pub fn parse_error(stderr: &str) -> (Option<String>, String) {
  static RE_ERROR: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"An error occurred \(([^)]+)\)(?: when calling the \w+ operation(?: \(reached max retries: \d+\))?)?: ?(.*)")
      .expect("static regex")
  });

  match RE_ERROR.captures(stderr) {
    Some(c) => {
      let code = c.get(1).map(|m| m.as_str().to_string());
      let message = c.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
      (code, message)
    }
    None => (None, stderr.trim().to_string()),
  }
}
