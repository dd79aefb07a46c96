//! Mission persistence wrapper with exponential backoff retry
//!
//! Wraps any MissionPersistencePort with bounded retry. It runs inside the
//! background task spawned by the completion sequence, so a slow or failing
//! server never holds up the UI.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{MissionCompletion, MissionPersistencePort, RemoteError};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries, just the initial attempt)
    pub max_retries: u32,
    /// Base delay in milliseconds before first retry
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds (caps exponential growth)
    pub max_delay_ms: u64,
    /// Jitter factor (0.0-1.0) for randomizing delays
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 8000,
            jitter_factor: 0.2,
        }
    }
}

/// Wrapper that adds retry logic to any persistence client
pub struct ResilientMissionPersistence {
    inner: Arc<dyn MissionPersistencePort>,
    config: RetryConfig,
}

impl ResilientMissionPersistence {
    pub fn new(inner: Arc<dyn MissionPersistencePort>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Delay before retry `attempt` (1-based): base * 2^(attempt-1), capped, with jitter
    fn calculate_delay(&self, attempt: u32) -> u64 {
        let base = self.config.base_delay_ms;
        let exponential = base.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exponential.min(self.config.max_delay_ms);

        let jitter_range = (capped as f64 * self.config.jitter_factor) as i64;
        if jitter_range > 0 {
            let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
            (capped as i64 + jitter).max(0) as u64
        } else {
            capped
        }
    }
}

#[async_trait]
impl MissionPersistencePort for ResilientMissionPersistence {
    async fn complete_mission(&self, completion: &MissionCompletion) -> Result<(), RemoteError> {
        let mut attempt = 0;
        loop {
            match self.inner.complete_mission(completion).await {
                Ok(()) => {
                    if attempt > 0 {
                        tracing::info!(
                            attempt = attempt + 1,
                            mission_id = %completion.mission_id,
                            "Mission completion persisted after retry"
                        );
                    }
                    return Ok(());
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.calculate_delay(attempt);
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay,
                        error = %e,
                        mission_id = %completion.mission_id,
                        "Persisting mission completion failed, retrying..."
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => {
                    tracing::error!(
                        attempts = attempt + 1,
                        retryable = e.is_retryable(),
                        error = %e,
                        mission_id = %completion.mission_id,
                        "Giving up on persisting mission completion"
                    );
                    return Err(e);
                }
            }
        }
    }
}
