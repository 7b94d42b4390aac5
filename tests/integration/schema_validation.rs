use jsonschema::validator_for;
use test_support::{cmd_bin, fixture_env, fixture_path};

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

fn enrich(event: &str, execution: &str) -> serde_json::Value {
  let mut cmd = cmd_bin("pipeline-failure-enrichment");
  cmd.envs(fixture_env(execution));
  cmd.arg("--event").arg(fixture_path(event));
  let out = cmd.output().unwrap();
  assert!(out.status.success());
  serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn enriched_event_conforms_to_schema() {
  let compiled = compile_schema("enriched-event.schema.json");

  for (event, execution) in [
    ("events/pipeline_failed.json", "executions/success.json"),
    ("events/sqs_pipeline_failed.json", "executions/codestar.json"),
    ("events/pipeline_failed.json", "executions/unknown_author.json"),
  ] {
    let v = enrich(event, execution);
    compiled
      .validate(&v)
      .unwrap_or_else(|e| panic!("schema validation failed for {event} + {execution}: {e}"));
  }
}

#[test]
fn header_only_event_conforms_to_schema() {
  let compiled = compile_schema("enriched-event.schema.json");
  let v = enrich("events/pipeline_failed.json", "executions/no_source_output.json");
  compiled.validate(&v).expect("schema validation failed for header-only event");
}

#[test]
fn schema_rejects_content_without_header() {
  let compiled = compile_schema("enriched-event.schema.json");
  let bad = serde_json::json!({
    "detail": { "pipeline": "p", "execution-id": "e" },
    "message-content": { "severity": "danger", "markup_fields": ["text"], "text": "x" }
  });
  assert!(compiled.validate(&bad).is_err());
}
