use test_support::{cmd_bin, fixture_env, fixture_path, read_fixture_json, read_fixture_text};

const BIN: &str = "pipeline-failure-enrichment";

fn run(event: &str, execution: &str, extra: &[&str]) -> serde_json::Value {
  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env(execution));
  cmd.arg("--event").arg(fixture_path(event)).args(extra);
  let out = cmd.output().unwrap();
  assert!(
    out.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&out.stderr)
  );
  serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn golden_path_attaches_header_and_content() {
  let v = run("events/pipeline_failed.json", "executions/success.json", &[]);

  assert_eq!(v["message-header"], "CodePipeline failed: myPipeline");
  assert_eq!(v["message-content"]["severity"], "danger");
  assert_eq!(v["message-content"]["markup_fields"], serde_json::json!(["text"]));
  assert_eq!(
    v["message-content"]["text"],
    "Build of <https://eu-west-2.console.aws.amazon.com/codesuite/codepipeline/pipelines/myPipeline/view|myPipeline> \
     failed after a commit by <@stephen.palfreyman> - \
     <https://github.com/hmrc/telemetry-terraform/commit/bc051f8d7fbf183dbb840462cb5c17d887964842|TEL-3481 create pagerduty-config-deployer>"
  );
}

#[test]
fn inbound_fields_are_preserved() {
  let inbound: serde_json::Value = read_fixture_json("events/pipeline_failed.json");
  let v = run("events/pipeline_failed.json", "executions/success.json", &[]);

  for (k, val) in inbound.as_object().unwrap() {
    assert_eq!(&v[k], val, "field {k} changed");
  }
}

#[test]
fn sqs_delivery_is_unwrapped_automatically() {
  let v = run("events/sqs_pipeline_failed.json", "executions/codestar.json", &[]);

  assert_eq!(v["message-header"], "CodePipeline failed: telemetry-terraform-pipeline");
  let text = v["message-content"]["text"].as_str().unwrap();
  assert!(text.contains("<@ali.bahman>"), "{text}");
  assert!(text.contains("|TEL-2490 fix alert routing>"), "{text}");
  assert!(text.contains("https://github.com/hmrc/telemetry-terraform/commit/a9e1670cc2f6e59aa8a2d5ee1ae3b48c6d0c12f2"));
  assert!(v.get("Records").is_none());
}

#[test]
fn direct_mode_rejects_wrapped_input() {
  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env("executions/success.json"));
  cmd
    .arg("--event")
    .arg(fixture_path("events/sqs_pipeline_failed.json"))
    .args(["--envelope", "direct"]);
  let out = cmd.output().unwrap();
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stderr).contains("no detail found"));
}

#[test]
fn missing_source_revision_yields_header_only() {
  let v = run("events/pipeline_failed.json", "executions/no_source_output.json", &[]);

  assert_eq!(v["message-header"], "CodePipeline failed: myPipeline");
  assert!(v.get("message-content").is_none());
}

#[test]
fn header_only_path_needs_no_token() {
  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env("executions/no_source_output.json"));
  cmd.env("PFE_TEST_SECRETS_JSON", "{}");
  cmd.arg("--event").arg(fixture_path("events/pipeline_failed.json"));
  cmd.assert().success();
}

#[test]
fn unknown_author_falls_back_to_team_handle() {
  let v = run("events/pipeline_failed.json", "executions/unknown_author.json", &[]);
  let text = v["message-content"]["text"].as_str().unwrap();
  assert!(text.contains("<@telemetry-engineers>"), "{text}");
  assert!(text.ends_with("|Bump provider versions>"));
}

#[test]
fn process_name_and_region_flow_into_message() {
  let v = run(
    "events/pipeline_failed.json",
    "executions/success.json",
    &["--process-name", "Deploy", "--region", "us-east-1"],
  );

  assert_eq!(v["message-header"], "Deploy failed: myPipeline");
  let text = v["message-content"]["text"].as_str().unwrap();
  assert!(text.starts_with("Build of <https://us-east-1.console.aws.amazon.com/"));
}

#[test]
fn configured_repository_overrides_url() {
  let v = run(
    "events/pipeline_failed.json",
    "executions/success.json",
    &["--github-repo", "hmrc/other-repo"],
  );
  let text = v["message-content"]["text"].as_str().unwrap();
  assert!(text.contains("https://github.com/hmrc/other-repo/commit/bc051f8d7fbf183dbb840462cb5c17d887964842"));
}

#[test]
fn runner_github_repository_env_is_ignored() {
  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env("executions/success.json"));
  cmd.env("GITHUB_REPOSITORY", "acme/ci-runner-repo");
  cmd.arg("--event").arg(fixture_path("events/pipeline_failed.json"));
  let out = cmd.output().unwrap();
  assert!(out.status.success());

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let text = v["message-content"]["text"].as_str().unwrap();
  assert!(text.contains("https://github.com/hmrc/telemetry-terraform/commit/"), "{text}");
}

#[test]
fn writes_to_out_file() {
  let td = test_support::tempdir();
  let out_path = td.path().join("enriched.json");

  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env("executions/success.json"));
  cmd
    .arg("--event")
    .arg(fixture_path("events/pipeline_failed.json"))
    .arg("--out")
    .arg(&out_path);
  let out = cmd.output().unwrap();
  assert!(out.status.success());
  assert!(out.stdout.is_empty());

  let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
  assert_eq!(v["message-header"], "CodePipeline failed: myPipeline");
}

#[test]
fn reads_event_from_stdin() {
  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env("executions/success.json"));
  cmd.write_stdin(read_fixture_text("events/pipeline_failed.json"));
  let out = cmd.output().unwrap();
  assert!(out.status.success());
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert!(v["message-content"]["text"].is_string());
}

#[test]
fn json_logs_carry_request_id() {
  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env("executions/success.json"));
  cmd.env("AWS_LAMBDA_REQUEST_ID", "req-42");
  cmd
    .arg("--event")
    .arg(fixture_path("events/pipeline_failed.json"))
    .args(["--log-format", "json"]);
  let out = cmd.output().unwrap();
  assert!(out.status.success());

  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("Lambda Request ID: req-42"));
  for line in err.lines().filter(|l| !l.trim().is_empty()) {
    serde_json::from_str::<serde_json::Value>(line).unwrap_or_else(|e| panic!("not JSON ({e}): {line}"));
  }
}
