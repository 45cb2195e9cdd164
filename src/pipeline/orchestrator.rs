use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::aws::CommandRunner;
use crate::errors::InspectaError;
use crate::report::{FindingsCollector, SavedReports};
use crate::services::{
    CisInspector, Ec2Inspector, EcrInspector, EksInspector, LambdaInspector, RdsInspector,
};

/// Which resource kinds a run covers, and where its reports go.
#[derive(Debug, Clone)]
pub struct InspectorOptions {
    pub lambda: bool,
    pub eks: bool,
    pub ec2: bool,
    pub rds: bool,
    pub ecr: bool,
    pub cis: bool,
    pub repositories: Vec<String>,
    pub output_dir: PathBuf,
}

impl Default for InspectorOptions {
    fn default() -> Self {
        Self {
            lambda: true,
            eks: true,
            ec2: true,
            rds: true,
            ecr: false,
            cis: true,
            repositories: Vec::new(),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Wires the enabled enumerators to the findings collector and drives one
/// audit run end to end.
pub struct Inspector {
    lambda: Option<LambdaInspector>,
    eks: Option<EksInspector>,
    ec2: Option<Ec2Inspector>,
    rds: Option<RdsInspector>,
    ecr: Option<EcrInspector>,
    cis: Option<CisInspector>,
    collector: FindingsCollector,
    output_dir: PathBuf,
}

impl Inspector {
    pub fn new(aws: Arc<dyn CommandRunner>, options: InspectorOptions) -> Self {
        info!(region = aws.region(), "Initializing inspector");
        Self {
            lambda: options.lambda.then(|| LambdaInspector::new(aws.clone(), true)),
            eks: options.eks.then(|| EksInspector::new(aws.clone(), true)),
            ec2: options.ec2.then(|| Ec2Inspector::new(aws.clone(), true)),
            rds: options.rds.then(|| RdsInspector::new(aws.clone(), true)),
            ecr: options
                .ecr
                .then(|| EcrInspector::new(aws.clone(), options.repositories.clone(), true)),
            cis: options.cis.then(|| CisInspector::new(aws.clone(), true)),
            collector: FindingsCollector::new(),
            output_dir: options.output_dir,
        }
    }

    /// Run the enabled enumerators sequentially, collect their findings, and
    /// flush the two report streams.
    pub async fn run(&mut self) -> Result<SavedReports, InspectaError> {
        info!("Inspector execution started");

        if let Some(inspector) = &self.lambda {
            self.collector.add_findings(inspector.get_findings().await);
        }
        if let Some(inspector) = &self.eks {
            self.collector.add_findings(inspector.get_findings().await);
        }
        if let Some(inspector) = &self.ec2 {
            self.collector.add_findings(inspector.get_findings().await);
        }
        if let Some(inspector) = &self.rds {
            self.collector.add_findings(inspector.get_findings().await);
        }
        if let Some(inspector) = &self.ecr {
            self.collector.add_findings(inspector.get_findings().await);
        }
        // CIS benchmark results go to their own report stream
        if let Some(inspector) = &self.cis {
            self.collector.add_cis_findings(inspector.get_findings().await);
        }

        let saved = self.collector.save(&self.output_dir).await?;
        info!(
            general = saved.general_count,
            cis = saved.cis_count,
            "Inspector execution completed"
        );
        Ok(saved)
    }
}
