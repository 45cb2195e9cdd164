use serde::{Deserialize, Serialize};

/// The category of scanned resource a batch of findings belongs to.
///
/// The kind is always supplied by the caller; it is never inferred from the
/// finding payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Lambda,
    Ec2,
    Eks,
    EcrRepository,
    Rds,
    Cis,
}

/// Which `resources[0].details` sub-object a kind contributes to the
/// normalized record. Kinds without an entry here (RDS, CIS) populate no
/// kind-specific detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    LambdaFunction,
    Ec2Instance,
    EcrContainerImage,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Lambda,
        ResourceKind::Ec2,
        ResourceKind::Eks,
        ResourceKind::EcrRepository,
        ResourceKind::Rds,
        ResourceKind::Cis,
    ];

    /// Service label stamped into the `"AWS Service"` field of every record.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Lambda => "Lambda",
            ResourceKind::Ec2 => "EC2",
            ResourceKind::Eks => "EKS",
            ResourceKind::EcrRepository => "ECR Repository",
            ResourceKind::Rds => "RDS",
            ResourceKind::Cis => "CIS",
        }
    }

    /// The Inspector2 `resourceType` filter value for this kind.
    pub fn resource_type(&self) -> &'static str {
        match self {
            ResourceKind::Lambda => "LambdaFunction",
            ResourceKind::Ec2 => "Ec2Instance",
            ResourceKind::Eks => "EksCluster",
            ResourceKind::EcrRepository => "EcrRepository",
            ResourceKind::Rds => "RdsInstance",
            ResourceKind::Cis => "CisBenchmark",
        }
    }

    /// EKS workloads are scanned via their container images, so EKS findings
    /// carry the same detail shape as ECR findings.
    pub fn detail_field(&self) -> Option<DetailField> {
        match self {
            ResourceKind::Lambda => Some(DetailField::LambdaFunction),
            ResourceKind::Ec2 => Some(DetailField::Ec2Instance),
            ResourceKind::Eks | ResourceKind::EcrRepository => Some(DetailField::EcrContainerImage),
            ResourceKind::Rds | ResourceKind::Cis => None,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
