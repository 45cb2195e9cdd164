use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "inspecta", version, about = "AWS Inspector2 findings aggregation and reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an audit over the enabled resource kinds
    Run(RunArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output directory for reports
    #[arg(short, long)]
    pub output: Option<String>,

    /// AWS region (falls back to config, then AWS_REGION, then us-east-1)
    #[arg(long)]
    pub region: Option<String>,

    /// Per-command timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip Lambda function scanning
    #[arg(long)]
    pub no_lambda: bool,

    /// Skip EKS cluster scanning
    #[arg(long)]
    pub no_eks: bool,

    /// Skip EC2 instance scanning
    #[arg(long)]
    pub no_ec2: bool,

    /// Skip RDS instance scanning
    #[arg(long)]
    pub no_rds: bool,

    /// Skip CIS benchmark findings
    #[arg(long)]
    pub no_cis: bool,

    /// Scan the configured ECR repositories
    #[arg(long)]
    pub ecr: bool,

    /// ECR repository ARN to scan (repeatable; overrides the config list)
    #[arg(long = "repository")]
    pub repositories: Vec<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
