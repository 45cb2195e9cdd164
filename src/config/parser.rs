use std::path::Path;
use crate::errors::InspectaError;
use super::types::InspectaConfig;
use super::security::validate_security_patterns;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<InspectaConfig, InspectaError> {
    if !path.exists() {
        return Err(InspectaError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(InspectaError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // Security pattern validation
    validate_security_patterns(&yaml)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: InspectaConfig = serde_yaml::from_value(yaml)?;

    // Semantic conflict detection
    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), InspectaError> {
    // Convert YAML value to JSON for schema validation
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| InspectaError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| InspectaError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| InspectaError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        if !messages.is_empty() {
            // Warn but don't fail — schema validation is advisory for now
            for msg in &messages {
                warn!(validation_error = %msg, "Config schema warning");
            }
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &InspectaConfig) -> Result<(), InspectaError> {
    let repositories = config
        .ecr
        .as_ref()
        .and_then(|e| e.repositories.as_deref())
        .unwrap_or(&[]);

    // Duplicate repository entries would be scanned twice
    for (i, repo) in repositories.iter().enumerate() {
        if repositories[..i].contains(repo) {
            return Err(InspectaError::Config(format!(
                "Repository '{}' listed more than once in ecr.repositories",
                repo
            )));
        }
    }

    let ecr_enabled = config
        .services
        .as_ref()
        .and_then(|s| s.ecr)
        .unwrap_or(false);

    if ecr_enabled && repositories.is_empty() {
        warn!("ECR scanning enabled but no repositories configured; nothing will be scanned");
    }
    if !ecr_enabled && !repositories.is_empty() {
        warn!("ecr.repositories configured but ECR scanning is disabled");
    }

    if let Some(aws) = &config.aws {
        if aws.max_attempts == Some(0) {
            return Err(InspectaError::Config("aws.max_attempts must be at least 1".into()));
        }
        if aws.timeout_secs == Some(0) {
            return Err(InspectaError::Config("aws.timeout_secs must be at least 1".into()));
        }
    }

    Ok(())
}
