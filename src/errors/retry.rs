use std::time::Duration;
use std::future::Future;

use super::classification::ErrorClassification;
use super::types::InspectaError;
use tracing::warn;

impl ErrorClassification {
    /// Calculate the retry delay for the current attempt number (0-indexed).
    ///
    /// Exponential backoff 2^attempt clamped to [4s, 10s], plus random
    /// sub-second jitter.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let base: f64 = 2.0_f64.powi(attempt as i32);
        let jitter: f64 = rand::random::<f64>();
        Duration::from_secs_f64(base.clamp(4.0, 10.0) + jitter)
    }
}

/// Retry configuration for AWS CLI invocations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and attempts remain.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, InspectaError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, InspectaError>>,
{
    let max_attempts = config.max_attempts.max(1);

    let mut last_error = None;

    for attempt in 0..max_attempts {
        match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let classification = e.classify();

                if !classification.retryable || attempt + 1 >= max_attempts {
                    if !classification.retryable {
                        warn!(
                            operation = operation_name,
                            error_type = classification.error_type,
                            "Non-retryable error, failing immediately"
                        );
                    } else {
                        warn!(
                            operation = operation_name,
                            attempt = attempt + 1,
                            max = max_attempts,
                            "Max retries exhausted"
                        );
                    }
                    return Err(e);
                }

                let delay = classification.retry_delay(attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max = max_attempts,
                    error_type = classification.error_type,
                    delay_secs = delay.as_secs(),
                    error = %e,
                    "Retrying after error"
                );

                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| InspectaError::Internal("Retry loop exited unexpectedly".into())))
}
