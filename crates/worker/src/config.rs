use std::time::Duration;

/// Default number of concurrent workers.
pub const DEFAULT_WORKER_COUNT: usize = 5;

/// Default dispatch queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default duration of the simulated computation.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Worker pool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    /// Number of worker loops (at least 1).
    pub worker_count: usize,
    /// Dispatch queue capacity (at least 1).
    pub queue_capacity: usize,
    /// How long [`SimulatedProcessor`](crate::SimulatedProcessor) works on a job.
    pub processing_delay: Duration,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }
}

impl WorkerPoolConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default |
    /// |-----------------------|---------|
    /// | `WORKER_COUNT`        | `5`     |
    /// | `QUEUE_CAPACITY`      | `100`   |
    /// | `PROCESSING_DELAY_MS` | `2000`  |
    pub fn from_env() -> Self {
        let worker_count: usize = std::env::var("WORKER_COUNT")
            .unwrap_or_else(|_| DEFAULT_WORKER_COUNT.to_string())
            .parse()
            .expect("WORKER_COUNT must be a valid usize");

        let queue_capacity: usize = std::env::var("QUEUE_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_QUEUE_CAPACITY.to_string())
            .parse()
            .expect("QUEUE_CAPACITY must be a valid usize");

        let processing_delay_ms: u64 = std::env::var("PROCESSING_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_PROCESSING_DELAY.as_millis().to_string())
            .parse()
            .expect("PROCESSING_DELAY_MS must be a valid u64");

        assert!(worker_count > 0, "WORKER_COUNT must be at least 1");
        assert!(queue_capacity > 0, "QUEUE_CAPACITY must be at least 1");

        Self {
            worker_count,
            queue_capacity,
            processing_delay: Duration::from_millis(processing_delay_ms),
        }
    }
}
