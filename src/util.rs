// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Small helpers shared by adapters and message composition (subprocess capture, sha/message trimming, IO)
// role: utilities/helpers
// inputs: Program + args + env; raw strings; file paths or "-"
// outputs: Captured subprocess output, trimmed strings, JSON documents
// side_effects: run_command spawns subprocesses; read_input/write_output touch stdin/stdout or files
// invariants:
// - short_sha never splits a char; first_line never includes a newline
// - "-" always means stdin/stdout
// errors: IO errors bubble with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::{Read, Write};
use std::process::Command;

use anyhow::{Context, Result};

/// Output of a finished subprocess, successful or not.
#[derive(Debug, Clone)]
pub struct CommandOutput {
  pub success: bool,
  pub stdout: String,
  pub stderr: String,
}

/// Spawn `program` with `args` and extra env vars, capturing both streams.
pub fn run_command(program: &str, args: &[String], envs: &[(&str, &str)]) -> std::io::Result<CommandOutput> {
  let out = Command::new(program)
    .args(args)
    .envs(envs.iter().copied())
    .output()?;

  Ok(CommandOutput {
    success: out.status.success(),
    stdout: String::from_utf8_lossy(&out.stdout).to_string(),
    stderr: String::from_utf8_lossy(&out.stderr).to_string(),
  })
}

/// Generates a short 12-character SHA from a full one.
pub fn short_sha(full: &str) -> String {
  full.chars().take(12).collect()
}

/// Text before the first line break.
pub fn first_line(text: &str) -> &str {
  text.split(['\n', '\r']).next().unwrap_or("")
}

/// Read a JSON document from a path, or stdin when `path` is "-".
pub fn read_input(path: &str) -> Result<serde_json::Value> {
  let mut buf = String::new();

  if path == "-" {
    std::io::stdin().read_to_string(&mut buf).context("reading event from stdin")?;
  } else {
    buf = std::fs::read_to_string(path).with_context(|| format!("reading event from {}", path))?;
  }

  serde_json::from_str(&buf).with_context(|| format!("parsing event JSON from {}", path))
}

/// Write pretty JSON to a path, or stdout when `path` is "-".
pub fn write_output(path: &str, value: &serde_json::Value) -> Result<()> {
  let text = serde_json::to_string_pretty(value)?;

  if path == "-" {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text)?;
  } else {
    std::fs::write(path, format!("{}\n", text)).with_context(|| format!("writing output to {}", path))?;
  }

  Ok(())
}
