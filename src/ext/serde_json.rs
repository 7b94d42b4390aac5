// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups into serde_json::Value plus truthiness checks for loosely-shaped event payloads
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (typed extraction, presence, truthiness)
// invariants: No panics; missing paths and explicit nulls are both "absent"; keys containing dots are addressed with fetch_key
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A resolved (or missing) location inside a JSON document.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn value(&self) -> Option<&'a serde_json::Value> {
    self.inner
  }

  /// Present and non-empty: `null`, `false`, `0`, `""`, `[]` and `{}` all count as empty.
  pub fn is_truthy(&self) -> bool {
    match self.inner {
      None | Some(serde_json::Value::Null) => false,
      Some(serde_json::Value::Bool(b)) => *b,
      Some(serde_json::Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
      Some(serde_json::Value::String(s)) => !s.is_empty(),
      Some(serde_json::Value::Array(a)) => !a.is_empty(),
      Some(serde_json::Value::Object(o)) => !o.is_empty(),
    }
  }

  pub fn as_str(&self) -> Option<&'a str> {
    self.inner.and_then(|v| v.as_str())
  }

  /// String form of a scalar; numbers and booleans are rendered, containers are not.
  pub fn to_display_string(&self) -> Option<String> {
    match self.inner? {
      serde_json::Value::String(s) => Some(s.clone()),
      serde_json::Value::Number(n) => Some(n.to_string()),
      serde_json::Value::Bool(b) => Some(b.to_string()),
      _ => None,
    }
  }

  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }
}

pub trait JsonFetch {
  /// Walk a dotted path such as `commit.author.email`.
  fn fetch(&self, path: &str) -> JsonFetched<'_>;

  /// Look up a single key verbatim (for keys like `execution-id` or `a.b`).
  fn fetch_key(&self, key: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let inner = path.split('.').try_fold(self, |cur, key| cur.get(key));

    JsonFetched { inner }
  }

  fn fetch_key(&self, key: &str) -> JsonFetched<'_> {
    JsonFetched { inner: self.get(key) }
  }
}
