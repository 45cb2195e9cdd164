use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::aws::AwsCli;
use crate::cli::commands::RunArgs;
use crate::config::{self, InspectaConfig};
use crate::errors::{InspectaError, RetryConfig};
use crate::pipeline::{Inspector, InspectorOptions};

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

pub async fn handle_run(args: RunArgs) -> Result<(), InspectaError> {
    // Parse config file if provided
    let file_config = if let Some(config_path) = &args.config {
        Some(config::parse_config(&PathBuf::from(config_path)).await?)
    } else {
        None
    };

    let region = resolve_region(&args, file_config.as_ref());
    let timeout_secs = args
        .timeout
        .or_else(|| file_config.as_ref()?.aws.as_ref()?.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let max_attempts = file_config
        .as_ref()
        .and_then(|c| c.aws.as_ref()?.max_attempts);

    let options = build_options(&args, file_config.as_ref());
    info!(
        region = %region,
        lambda = options.lambda,
        eks = options.eks,
        ec2 = options.ec2,
        rds = options.rds,
        ecr = options.ecr,
        cis = options.cis,
        "Starting audit run"
    );

    let mut aws = AwsCli::new(region, timeout_secs);
    if let Some(max_attempts) = max_attempts {
        aws = aws.with_retry_config(RetryConfig { max_attempts });
    }

    let mut inspector = Inspector::new(Arc::new(aws), options);
    let saved = inspector.run().await?;

    println!(
        "Findings report: {} ({} findings)",
        saved.general_path.display(),
        saved.general_count
    );
    println!(
        "CIS report:      {} ({} findings)",
        saved.cis_path.display(),
        saved.cis_count
    );

    Ok(())
}

fn resolve_region(args: &RunArgs, file_config: Option<&InspectaConfig>) -> String {
    args.region
        .clone()
        .or_else(|| file_config?.aws.as_ref()?.region.clone())
        .or_else(|| std::env::var("AWS_REGION").ok())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

fn build_options(args: &RunArgs, file_config: Option<&InspectaConfig>) -> InspectorOptions {
    let services = file_config.and_then(|c| c.services.as_ref());
    let enabled = |file_flag: Option<bool>, cli_skip: bool, default: bool| -> bool {
        !cli_skip && file_flag.unwrap_or(default)
    };

    let repositories = if !args.repositories.is_empty() {
        args.repositories.clone()
    } else {
        file_config
            .and_then(|c| c.ecr.as_ref()?.repositories.clone())
            .unwrap_or_default()
    };

    let output_dir = args
        .output
        .clone()
        .or_else(|| file_config?.output.as_ref()?.directory.clone())
        .unwrap_or_else(|| "./output".to_string());

    InspectorOptions {
        lambda: enabled(services.and_then(|s| s.lambda), args.no_lambda, true),
        eks: enabled(services.and_then(|s| s.eks), args.no_eks, true),
        ec2: enabled(services.and_then(|s| s.ec2), args.no_ec2, true),
        rds: enabled(services.and_then(|s| s.rds), args.no_rds, true),
        // ECR is opt-in: a CLI flag or a config flag turns it on
        ecr: args.ecr || services.and_then(|s| s.ecr).unwrap_or(false),
        cis: enabled(services.and_then(|s| s.cis), args.no_cis, true),
        repositories,
        output_dir: PathBuf::from(output_dir),
    }
}
