use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::aws::{CommandOutput, CommandRunner};
use crate::findings::{NormalizedFinding, ResourceKind};
use super::{account_id, findings_for_resource};

/// Enumerates EC2 instances and gathers Inspector2 findings for each.
pub struct Ec2Inspector {
    aws: Arc<dyn CommandRunner>,
    enabled: bool,
}

impl Ec2Inspector {
    pub fn new(aws: Arc<dyn CommandRunner>, enabled: bool) -> Self {
        Self { aws, enabled }
    }

    pub async fn get_findings(&self) -> Vec<NormalizedFinding> {
        if !self.enabled {
            return Vec::new();
        }
        let instances = self.list_instance_ids().await;
        info!(count = instances.len(), "Scanning EC2 instances");
        if instances.is_empty() {
            return Vec::new();
        }

        let Some(account) = account_id(self.aws.as_ref()).await else {
            error!("Cannot build EC2 instance ARNs without an account id");
            return Vec::new();
        };
        let region = self.aws.region().to_string();

        let mut findings = Vec::new();
        for instance_id in &instances {
            let arn = format!("arn:aws:ec2:{}:{}:instance/{}", region, account, instance_id);
            findings.extend(
                findings_for_resource(self.aws.as_ref(), ResourceKind::Ec2, Some(&arn)).await,
            );
        }
        findings
    }

    async fn list_instance_ids(&self) -> Vec<String> {
        match self.aws.run_json(&["ec2", "describe-instances"]).await {
            Ok(CommandOutput::Json(result)) => extract_instance_ids(&result),
            Ok(CommandOutput::Empty) => Vec::new(),
            Err(e) => {
                error!(error = %e, "Failed to describe EC2 instances");
                Vec::new()
            }
        }
    }
}

/// Instance ids live two levels down, grouped by reservation.
fn extract_instance_ids(result: &Value) -> Vec<String> {
    result
        .get("Reservations")
        .and_then(Value::as_array)
        .map(|reservations| {
            reservations
                .iter()
                .filter_map(|r| r.get("Instances").and_then(Value::as_array))
                .flatten()
                .filter_map(|i| i.get("InstanceId").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
