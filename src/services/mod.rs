pub mod cis;
pub mod ec2;
pub mod ecr;
pub mod eks;
pub mod lambda;
pub mod rds;

pub use cis::CisInspector;
pub use ec2::Ec2Inspector;
pub use ecr::EcrInspector;
pub use eks::EksInspector;
pub use lambda::LambdaInspector;
pub use rds::RdsInspector;

use serde_json::Value;
use tracing::error;

use crate::aws::{filter_criteria, CommandOutput, CommandRunner};
use crate::findings::{normalize, NormalizedFinding, ResourceKind};

/// List Inspector2 findings for one resource and normalize them.
///
/// Collaborator failures are logged and yield an empty batch; enumeration
/// never aborts a run over one resource.
pub(crate) async fn findings_for_resource(
    aws: &dyn CommandRunner,
    kind: ResourceKind,
    resource_arn: Option<&str>,
) -> Vec<NormalizedFinding> {
    let criteria = filter_criteria(kind.resource_type(), resource_arn);
    match aws
        .run_json(&["inspector2", "list-findings", "--filter-criteria", &criteria])
        .await
    {
        Ok(output) => normalize(output.into_value().as_ref(), kind),
        Err(e) => {
            error!(kind = %kind, error = %e, "Failed to list findings");
            Vec::new()
        }
    }
}

/// Resolve the caller's account id via STS, needed to build resource ARNs.
pub(crate) async fn account_id(aws: &dyn CommandRunner) -> Option<String> {
    match aws.run_json(&["sts", "get-caller-identity"]).await {
        Ok(CommandOutput::Json(identity)) => identity
            .get("Account")
            .and_then(Value::as_str)
            .map(str::to_string),
        Ok(CommandOutput::Empty) => {
            error!("Caller identity lookup returned no payload");
            None
        }
        Err(e) => {
            error!(error = %e, "Failed to resolve caller identity");
            None
        }
    }
}
