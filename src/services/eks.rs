use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::aws::{CommandOutput, CommandRunner};
use crate::findings::{NormalizedFinding, ResourceKind};
use super::{account_id, findings_for_resource};

/// Enumerates EKS clusters and gathers Inspector2 findings for each.
pub struct EksInspector {
    aws: Arc<dyn CommandRunner>,
    enabled: bool,
}

impl EksInspector {
    pub fn new(aws: Arc<dyn CommandRunner>, enabled: bool) -> Self {
        Self { aws, enabled }
    }

    pub async fn get_findings(&self) -> Vec<NormalizedFinding> {
        if !self.enabled {
            return Vec::new();
        }
        let clusters = self.list_clusters().await;
        info!(count = clusters.len(), "Scanning EKS clusters");
        if clusters.is_empty() {
            return Vec::new();
        }

        let Some(account) = account_id(self.aws.as_ref()).await else {
            error!("Cannot build EKS cluster ARNs without an account id");
            return Vec::new();
        };
        let region = self.aws.region().to_string();

        let mut findings = Vec::new();
        for cluster_name in &clusters {
            let arn = format!("arn:aws:eks:{}:{}:cluster/{}", region, account, cluster_name);
            findings.extend(
                findings_for_resource(self.aws.as_ref(), ResourceKind::Eks, Some(&arn)).await,
            );
        }
        findings
    }

    async fn list_clusters(&self) -> Vec<String> {
        match self.aws.run_json(&["eks", "list-clusters"]).await {
            Ok(CommandOutput::Json(result)) => result
                .get("clusters")
                .and_then(Value::as_array)
                .map(|clusters| {
                    clusters
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            Ok(CommandOutput::Empty) => Vec::new(),
            Err(e) => {
                error!(error = %e, "Failed to list EKS clusters");
                Vec::new()
            }
        }
    }
}
