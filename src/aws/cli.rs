use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::errors::{with_retry, InspectaError, RetryConfig};

/// Outcome of a successful CLI invocation.
///
/// `Empty` is the empty-result sentinel: the command ran but produced nothing
/// usable (non-zero exit, blank stdout, or an empty JSON payload). Transport
/// faults travel in the `Result` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Empty,
    Json(Value),
}

impl CommandOutput {
    pub fn into_value(self) -> Option<Value> {
        match self {
            CommandOutput::Empty => None,
            CommandOutput::Json(value) => Some(value),
        }
    }
}

/// Capability interface for the external command-execution service.
///
/// Enumerators depend on this trait rather than on a concrete process
/// spawner, which keeps them testable with canned payloads.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run an AWS CLI subcommand and decode its JSON output.
    async fn run_json(&self, args: &[&str]) -> Result<CommandOutput, InspectaError>;

    /// The region every invocation is pinned to.
    fn region(&self) -> &str;
}

/// Production runner: spawns the `aws` binary with a timeout and retries
/// transient failures.
pub struct AwsCli {
    region: String,
    timeout_secs: u64,
    retry: RetryConfig,
}

impl AwsCli {
    pub fn new(region: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            region: region.into(),
            timeout_secs,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn exec_once(&self, args: &[&str]) -> Result<CommandOutput, InspectaError> {
        let rendered = format!("aws {}", args.join(" "));
        debug!(command = %rendered, "Executing AWS CLI command");

        let mut command = Command::new("aws");
        command
            .args(args)
            .args(["--region", &self.region, "--output", "json"])
            .kill_on_drop(true);

        let output = tokio::time::timeout(Duration::from_secs(self.timeout_secs), command.output())
            .await
            .map_err(|_| {
                InspectaError::Timeout(format!(
                    "Command timed out after {}s: {}",
                    self.timeout_secs, rendered
                ))
            })?
            .map_err(|e| InspectaError::Command(format!("Failed to spawn aws: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(
                command = %rendered,
                exit_code = output.status.code().unwrap_or(-1),
                stderr = %stderr.trim(),
                "Command failed"
            );
            return Ok(CommandOutput::Empty);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            error!(command = %rendered, "Command returned empty output");
            return Ok(CommandOutput::Empty);
        }

        let payload: Value = serde_json::from_str(&stdout)?;
        if payload_is_empty(&payload) {
            warn!(command = %rendered, "Command returned empty JSON payload");
            return Ok(CommandOutput::Empty);
        }

        debug!(command = %rendered, bytes = stdout.len(), "Parsed JSON output");
        Ok(CommandOutput::Json(payload))
    }
}

#[async_trait]
impl CommandRunner for AwsCli {
    async fn run_json(&self, args: &[&str]) -> Result<CommandOutput, InspectaError> {
        with_retry("aws-cli", &self.retry, || self.exec_once(args)).await
    }

    fn region(&self) -> &str {
        &self.region
    }
}

fn payload_is_empty(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
