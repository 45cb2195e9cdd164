use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::aws::CommandRunner;
use crate::errors::InspectaError;
use crate::findings::{NormalizedFinding, ResourceKind};
use super::findings_for_resource;

/// Gathers Inspector2 findings for a configured list of ECR repositories.
///
/// Unlike the other inspectors there is no discovery step: scanning every
/// repository in a registry is rarely wanted, so the list comes from
/// configuration.
pub struct EcrInspector {
    aws: Arc<dyn CommandRunner>,
    repositories: Vec<String>,
    enabled: bool,
}

impl EcrInspector {
    pub fn new(aws: Arc<dyn CommandRunner>, repositories: Vec<String>, enabled: bool) -> Self {
        Self { aws, repositories, enabled }
    }

    pub async fn get_findings(&self) -> Vec<NormalizedFinding> {
        if !self.enabled || self.repositories.is_empty() {
            return Vec::new();
        }
        info!(count = self.repositories.len(), "Scanning ECR repositories");

        let mut findings = Vec::new();
        for repository_arn in &self.repositories {
            match parse_repository_arn(repository_arn) {
                Ok((account, name)) => {
                    debug!(account = %account, repository = %name, "Scanning ECR repository")
                }
                Err(e) => {
                    warn!(repository = %repository_arn, error = %e, "Skipping malformed repository ARN");
                    continue;
                }
            }
            findings.extend(
                findings_for_resource(
                    self.aws.as_ref(),
                    ResourceKind::EcrRepository,
                    Some(repository_arn),
                )
                .await,
            );
        }
        findings
    }
}

/// Split a repository ARN into account id and repository name (the last path
/// segment, since repository names may themselves contain slashes).
pub fn parse_repository_arn(repository_arn: &str) -> Result<(String, String), InspectaError> {
    let invalid = || InspectaError::Config(format!("Invalid repository ARN: {}", repository_arn));

    let (prefix, rest) = repository_arn.split_once('/').ok_or_else(invalid)?;
    let name = rest.rsplit('/').next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let account = prefix.split(':').nth(4).filter(|s| !s.is_empty()).ok_or_else(invalid)?;

    Ok((account.to_string(), name.to_string()))
}
