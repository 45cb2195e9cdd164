use std::sync::Arc;

use tracing::info;

use crate::aws::CommandRunner;
use crate::findings::{NormalizedFinding, ResourceKind};
use super::findings_for_resource;

/// Gathers CIS benchmark findings. One account-wide query; CIS findings are
/// not tied to an individual resource ARN.
pub struct CisInspector {
    aws: Arc<dyn CommandRunner>,
    enabled: bool,
}

impl CisInspector {
    pub fn new(aws: Arc<dyn CommandRunner>, enabled: bool) -> Self {
        Self { aws, enabled }
    }

    pub async fn get_findings(&self) -> Vec<NormalizedFinding> {
        if !self.enabled {
            return Vec::new();
        }
        info!("Scanning CIS benchmark findings");
        findings_for_resource(self.aws.as_ref(), ResourceKind::Cis, None).await
    }
}
