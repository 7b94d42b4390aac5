use predicates::prelude::*;
use test_support::{cmd_bin, fixture_env, fixture_path};

const BIN: &str = "pipeline-failure-enrichment";

fn cmd_for(event: &str) -> assert_cmd::Command {
  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env("executions/success.json"));
  cmd.arg("--event").arg(fixture_path(event));
  cmd
}

#[test]
fn empty_detail_is_rejected() {
  cmd_for("events/no_detail.json")
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("invalid event shape: no detail found in event"));
}

#[test]
fn missing_execution_id_is_rejected() {
  cmd_for("events/no_execution_id.json")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no execution id found in detail"));
}

#[test]
fn pipeline_not_found_propagates() {
  cmd_for("events/pipeline_failed.json")
    .env("PFE_TEST_EXECUTION_ERROR", "PipelineNotFoundException")
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "PipelineNotFoundException: pipeline myPipeline does not exist",
    ));
}

#[test]
fn throttling_propagates() {
  cmd_for("events/pipeline_failed.json")
    .env("PFE_TEST_EXECUTION_ERROR", "ThrottlingException")
    .assert()
    .failure()
    .stderr(predicate::str::contains("ThrottlingException"));
}

#[test]
fn missing_token_parameter_propagates() {
  cmd_for("events/pipeline_failed.json")
    .env("PFE_TEST_SECRETS_JSON", "{}")
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "parameter not found: /secrets/github/telemetry_github_token",
    ));
}

#[test]
fn custom_token_parameter_is_used() {
  cmd_for("events/pipeline_failed.json")
    .args(["--github-token-param", "/elsewhere"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("parameter not found: /elsewhere"));
}

#[test]
fn missing_commit_propagates() {
  cmd_for("events/pipeline_failed.json")
    .env("PFE_TEST_COMMITS_JSON", "{}")
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "commit bc051f8d7fbf183dbb840462cb5c17d887964842 not found in hmrc/telemetry-terraform",
    ));
}

#[test]
fn invalid_repository_flag_is_refused() {
  cmd_for("events/pipeline_failed.json")
    .args(["--github-repo", "not a repo"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid --github-repo"));
}

#[test]
fn invalid_region_is_refused() {
  cmd_for("events/pipeline_failed.json")
    .args(["--region", "EU WEST"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid --region"));
}

#[test]
fn empty_queue_envelope_is_rejected() {
  let td = test_support::tempdir();
  let path = td.path().join("empty.json");
  std::fs::write(&path, r#"{"Records": []}"#).unwrap();

  let mut cmd = cmd_bin(BIN);
  cmd.envs(fixture_env("executions/success.json"));
  cmd
    .arg("--event")
    .arg(&path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("queue envelope contains no records"));
}

#[test]
fn unreadable_event_file_fails() {
  cmd_bin(BIN)
    .args(["--event", "tests/fixtures/events/does-not-exist.json"])
    .assert()
    .failure();
}
