use crate::clients::aws_cli::{AwsCli, AwsCliError};
use crate::clients::PipelineApi;
use crate::error::PipelineLookupError;
use crate::model::{GetPipelineExecutionOutput, PipelineExecution};

/// CodePipeline execution history read through `aws codepipeline get-pipeline-execution`.
pub struct AwsCodePipelineApi {
  cli: AwsCli,
}

impl AwsCodePipelineApi {
  pub fn new(cli: AwsCli) -> Self {
    Self { cli }
  }
}

impl PipelineApi for AwsCodePipelineApi {
  fn get_execution(&self, pipeline: &str, execution_id: &str) -> Result<PipelineExecution, PipelineLookupError> {
    let out = self
      .cli
      .call(&[
        "codepipeline",
        "get-pipeline-execution",
        "--pipeline-name",
        pipeline,
        "--pipeline-execution-id",
        execution_id,
      ])
      .map_err(|e| match e {
        AwsCliError::Failed { code: Some(code), message } => classify(&code, &message, pipeline, execution_id),
        AwsCliError::BadOutput(m) => PipelineLookupError::Malformed(m),
        other => PipelineLookupError::Transport(other.to_string()),
      })?;

    parse_execution(out)
  }
}

pub fn parse_execution(out: serde_json::Value) -> Result<PipelineExecution, PipelineLookupError> {
  serde_json::from_value::<GetPipelineExecutionOutput>(out)
    .map(|o| o.pipeline_execution)
    .map_err(|e| PipelineLookupError::Malformed(e.to_string()))
}

/// Map a CodePipeline error code onto a lookup error kind.
pub fn classify(code: &str, message: &str, pipeline: &str, execution_id: &str) -> PipelineLookupError {
  match code {
    "PipelineNotFoundException" => PipelineLookupError::PipelineNotFound {
      pipeline: pipeline.to_string(),
    },
    "PipelineExecutionNotFoundException" => PipelineLookupError::ExecutionNotFound {
      pipeline: pipeline.to_string(),
      execution_id: execution_id.to_string(),
    },
    "ThrottlingException" | "Throttling" | "TooManyRequestsException" => PipelineLookupError::Throttled {
      message: message.to_string(),
    },
    _ => PipelineLookupError::Service {
      code: code.to_string(),
      message: message.to_string(),
    },
  }
}
