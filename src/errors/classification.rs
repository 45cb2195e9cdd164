use super::types::InspectaError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl InspectaError {
    /// Classify this error to determine its type and whether it can be retried.
    ///
    /// Transient AWS CLI failures retry: timeouts, spawn errors, and JSON
    /// decode errors (the CLI emits truncated JSON when throttled). Anything
    /// wrong with local state does not.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            InspectaError::Command(_) => ErrorClassification {
                error_type: "CommandError",
                retryable: true,
            },
            InspectaError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            InspectaError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: true,
            },

            // Non-retryable errors
            InspectaError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            InspectaError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            InspectaError::Report(_) => ErrorClassification {
                error_type: "ReportError",
                retryable: false,
            },
            InspectaError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: false,
            },
            InspectaError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }
}
