use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::aws::{CommandOutput, CommandRunner};
use crate::findings::{NormalizedFinding, ResourceKind};
use super::findings_for_resource;

/// Enumerates Lambda functions and gathers Inspector2 findings for each.
pub struct LambdaInspector {
    aws: Arc<dyn CommandRunner>,
    enabled: bool,
}

impl LambdaInspector {
    pub fn new(aws: Arc<dyn CommandRunner>, enabled: bool) -> Self {
        Self { aws, enabled }
    }

    pub async fn get_findings(&self) -> Vec<NormalizedFinding> {
        if !self.enabled {
            return Vec::new();
        }
        let functions = self.list_functions().await;
        info!(count = functions.len(), "Scanning Lambda functions");

        let mut findings = Vec::new();
        for function_arn in &functions {
            findings.extend(
                findings_for_resource(self.aws.as_ref(), ResourceKind::Lambda, Some(function_arn))
                    .await,
            );
        }
        findings
    }

    async fn list_functions(&self) -> Vec<String> {
        match self.aws.run_json(&["lambda", "list-functions"]).await {
            Ok(CommandOutput::Json(result)) => result
                .get("Functions")
                .and_then(Value::as_array)
                .map(|functions| {
                    functions
                        .iter()
                        .filter_map(|f| f.get("FunctionArn").and_then(Value::as_str))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            Ok(CommandOutput::Empty) => Vec::new(),
            Err(e) => {
                error!(error = %e, "Failed to list Lambda functions");
                Vec::new()
            }
        }
    }
}
