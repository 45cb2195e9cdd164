use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::aws::{CommandOutput, CommandRunner};
use crate::findings::{NormalizedFinding, ResourceKind};
use super::findings_for_resource;

/// Enumerates RDS instances and gathers Inspector2 findings for each.
pub struct RdsInspector {
    aws: Arc<dyn CommandRunner>,
    enabled: bool,
}

impl RdsInspector {
    pub fn new(aws: Arc<dyn CommandRunner>, enabled: bool) -> Self {
        Self { aws, enabled }
    }

    pub async fn get_findings(&self) -> Vec<NormalizedFinding> {
        if !self.enabled {
            return Vec::new();
        }
        let instances = self.list_db_instances().await;
        info!(count = instances.len(), "Scanning RDS instances");

        let mut findings = Vec::new();
        for db_instance_id in &instances {
            // The identifier goes into the resourceArn filter as-is; Inspector2
            // matches RDS instances on identifier.
            findings.extend(
                findings_for_resource(self.aws.as_ref(), ResourceKind::Rds, Some(db_instance_id))
                    .await,
            );
        }
        findings
    }

    async fn list_db_instances(&self) -> Vec<String> {
        match self.aws.run_json(&["rds", "describe-db-instances"]).await {
            Ok(CommandOutput::Json(result)) => result
                .get("DBInstances")
                .and_then(Value::as_array)
                .map(|instances| {
                    instances
                        .iter()
                        .filter_map(|db| db.get("DBInstanceIdentifier").and_then(Value::as_str))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            Ok(CommandOutput::Empty) => Vec::new(),
            Err(e) => {
                error!(error = %e, "Failed to describe RDS instances");
                Vec::new()
            }
        }
    }
}
