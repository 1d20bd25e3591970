//! The processing routine run by each worker.
//!
//! [`JobProcessor`] is where a real workload plugs in. The shipped
//! [`SimulatedProcessor`] stands in for one with a fixed-duration sleep.

use std::time::Duration;

use async_trait::async_trait;
use jobq_core::job::RESULT_PROCESSED;
use jobq_db::models::job::Job;

/// Failure while executing a job inside a worker.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// The workload reported an error.
    #[error("Processing failed: {0}")]
    Failed(String),

    /// The workload finished without producing a result.
    #[error("Processing produced an empty result")]
    EmptyResult,
}

/// Executes one job and produces its result string.
#[async_trait]
pub trait JobProcessor: Send + Sync {
    async fn process(&self, job: &Job) -> Result<String, ProcessingError>;
}

/// Sleeps for a fixed duration, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl JobProcessor for SimulatedProcessor {
    async fn process(&self, job: &Job) -> Result<String, ProcessingError> {
        tracing::debug!(job_id = %job.id, delay_ms = self.delay.as_millis() as u64, "Simulating work");
        tokio::time::sleep(self.delay).await;
        Ok(RESULT_PROCESSED.to_string())
    }
}
