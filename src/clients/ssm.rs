use crate::clients::aws_cli::{AwsCli, AwsCliError};
use crate::clients::SecretStore;
use crate::error::SecretError;
use crate::ext::serde_json::JsonFetch;

/// SSM Parameter Store read through `aws ssm get-parameter --with-decryption`.
pub struct AwsSsmSecretStore {
  cli: AwsCli,
}

impl AwsSsmSecretStore {
  pub fn new(cli: AwsCli) -> Self {
    Self { cli }
  }
}

impl SecretStore for AwsSsmSecretStore {
  fn get(&self, name: &str) -> Result<String, SecretError> {
    let out = self
      .cli
      .call(&["ssm", "get-parameter", "--name", name, "--with-decryption"])
      .map_err(|e| classify(name, e))?;

    out
      .fetch("Parameter.Value")
      .as_str()
      .map(str::to_string)
      .ok_or_else(|| SecretError::Service {
        name: name.to_string(),
        code: "MalformedResponse".into(),
        message: "Parameter.Value missing from get-parameter output".into(),
      })
  }
}

fn classify(name: &str, err: AwsCliError) -> SecretError {
  match err {
    AwsCliError::Failed { code: Some(code), .. } if code == "ParameterNotFound" => SecretError::NotFound { name: name.to_string() },
    AwsCliError::Failed { code: Some(code), message } => SecretError::Service {
      name: name.to_string(),
      code,
      message,
    },
    other => SecretError::Transport(other.to_string()),
  }
}
