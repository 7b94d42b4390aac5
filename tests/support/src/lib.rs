//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust,ignore
//! use test_support::{cmd_bin, fixture_env};
//!
//! let mut cmd = cmd_bin("pipeline-failure-enrichment");
//! cmd.envs(fixture_env("executions/success.json"));
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::{env, path::{Path, PathBuf}};

/// Parameter name the binary reads the GitHub token from by default.
pub const TOKEN_PARAM: &str = "/secrets/github/telemetry_github_token";

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
///
/// This crate lives at `<repo>/tests/support`, so the fixtures sit next to it.
pub fn fixtures_dir() -> PathBuf {
    let support = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    support
        .parent()
        .map(|tests| tests.join("fixtures"))
        .unwrap_or_else(|| support.join("fixtures"))
}

pub fn fixture_path<P: AsRef<Path>>(rel_path: P) -> PathBuf {
    fixtures_dir().join(rel_path)
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixture_path(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixture_path(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// Environment that switches the binary to fixture-backed collaborators:
/// the token secret, the given execution response and `commits.json`.
pub fn fixture_env(execution_fixture: &str) -> Vec<(String, String)> {
    vec![
        (
            "PFE_TEST_SECRETS_JSON".to_string(),
            format!("{{\"{}\":\"token123\"}}", TOKEN_PARAM),
        ),
        (
            "PFE_TEST_EXECUTION_JSON".to_string(),
            read_fixture_text(execution_fixture),
        ),
        (
            "PFE_TEST_COMMITS_JSON".to_string(),
            read_fixture_text("commits.json"),
        ),
    ]
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Set multiple environment variables for the duration of the returned guard.
pub fn with_env(vars: &[(&str, &str)]) -> EnvGuard {
    EnvGuard::set_many(vars)
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// The command starts from a scrubbed environment for the variables the
/// binary reads, so a developer's shell cannot leak into assertions.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    for k in [
        "AWS_REGION",
        "PFE_GITHUB_REPOSITORY",
        "GITHUB_TOKEN_PARAM",
        "PFE_GITHUB_API_URL",
        "PROCESS_NAME",
        "LOG_FORMAT",
        "AWS_LAMBDA_REQUEST_ID",
        "AWS_LAMBDA_FUNCTION_NAME",
        "PFE_TEST_SECRETS_JSON",
        "PFE_TEST_EXECUTION_JSON",
        "PFE_TEST_EXECUTION_ERROR",
        "PFE_TEST_COMMITS_JSON",
    ] {
        cmd.env_remove(k);
    }
    cmd.env("LOG_LEVEL", "info");
    cmd
}

/// Guard for temporarily setting environment variables.
pub struct EnvGuard {
    prev: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn set_many(kv: &[(&str, &str)]) -> Self {
        let mut prev = Vec::with_capacity(kv.len());
        for (k, v) in kv {
            let k_owned = k.to_string();
            prev.push((k_owned.clone(), env::var(k).ok()));
            env::set_var(k, v);
        }
        Self { prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, old) in self.prev.drain(..) {
            match old {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}
