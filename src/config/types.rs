use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InspectaConfig {
    pub services: Option<ServicesConfig>,
    pub ecr: Option<EcrConfig>,
    pub aws: Option<AwsConfig>,
    pub output: Option<OutputConfig>,
}

/// Per-service enablement. A missing flag falls back to the default for that
/// service: everything on except ECR, which needs a repository list to be
/// useful.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServicesConfig {
    pub lambda: Option<bool>,
    pub eks: Option<bool>,
    pub ec2: Option<bool>,
    pub rds: Option<bool>,
    pub ecr: Option<bool>,
    pub cis: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EcrConfig {
    pub repositories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AwsConfig {
    pub region: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub directory: Option<String>,
}
