//! Fixed-size pool of workers draining the dispatch queue.
//!
//! Each worker loops: dequeue an id, mark it `processing`, run the
//! [`JobProcessor`], then mark it `done` or `failed`. A failure on one job
//! is logged and the worker moves on; it never takes the pool down.
//!
//! Shutdown cancels a shared [`CancellationToken`]. Idle workers stop
//! waiting on the queue immediately; busy workers finish their current job
//! first. Ids still buffered after the workers exit stay `pending` in the
//! store and are reported in the [`ShutdownReport`].

use std::sync::Arc;
use std::time::Duration;

use jobq_core::types::JobId;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::processor::{JobProcessor, ProcessingError};
use crate::queue::DispatchQueue;
use crate::registry::JobRegistry;

/// Builder for a set of workers sharing one queue and one registry.
pub struct WorkerPool {
    registry: JobRegistry,
    queue: Arc<DispatchQueue>,
    processor: Arc<dyn JobProcessor>,
    size: usize,
}

impl WorkerPool {
    /// Create a pool of `size` workers (minimum 1).
    pub fn new(
        registry: JobRegistry,
        queue: Arc<DispatchQueue>,
        processor: Arc<dyn JobProcessor>,
        size: usize,
    ) -> Self {
        Self {
            registry,
            queue,
            processor,
            size: size.max(1),
        }
    }

    /// Spawn the workers onto the current Tokio runtime.
    pub fn start(self) -> WorkerPoolHandle {
        let cancel = CancellationToken::new();
        let tracker = TaskTracker::new();

        for worker_id in 1..=self.size {
            let worker = Worker {
                id: worker_id,
                registry: self.registry.clone(),
                queue: Arc::clone(&self.queue),
                processor: Arc::clone(&self.processor),
            };
            tracker.spawn(worker.run(cancel.clone()));
        }
        tracker.close();

        tracing::info!(
            workers = self.size,
            queue_capacity = self.queue.capacity(),
            "Worker pool started",
        );

        WorkerPoolHandle {
            cancel,
            tracker,
            queue: self.queue,
            size: self.size,
        }
    }
}

/// Outcome of [`WorkerPoolHandle::shutdown`].
#[derive(Debug, Default)]
pub struct ShutdownReport {
    /// Ids that were still queued; their jobs remain `pending`.
    pub stranded: Vec<JobId>,
    /// Whether some worker was still busy when the timeout elapsed.
    pub timed_out: bool,
}

/// Handle to a running pool.
pub struct WorkerPoolHandle {
    cancel: CancellationToken,
    tracker: TaskTracker,
    queue: Arc<DispatchQueue>,
    size: usize,
}

impl WorkerPoolHandle {
    /// Number of workers spawned.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Stop the workers, wait up to `timeout` for them to exit, then close
    /// the queue.
    pub async fn shutdown(self, timeout: Duration) -> ShutdownReport {
        tracing::info!(workers = self.size, "Worker pool shutting down");
        self.cancel.cancel();

        let timed_out = tokio::time::timeout(timeout, self.tracker.wait())
            .await
            .is_err();
        if timed_out {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "Workers still busy after shutdown timeout; their jobs stay processing",
            );
        }

        let stranded = self.queue.close().await;
        if !stranded.is_empty() {
            tracing::warn!(
                count = stranded.len(),
                job_ids = ?stranded,
                "Queued jobs left pending at shutdown",
            );
        }

        tracing::info!("Worker pool stopped");
        ShutdownReport {
            stranded,
            timed_out,
        }
    }
}

/// One processing loop.
struct Worker {
    id: usize,
    registry: JobRegistry,
    queue: Arc<DispatchQueue>,
    processor: Arc<dyn JobProcessor>,
}

impl Worker {
    async fn run(self, cancel: CancellationToken) {
        tracing::debug!(worker_id = self.id, "Worker started");

        loop {
            let job_id = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                next = self.queue.dequeue() => match next {
                    Some(id) => id,
                    None => break,
                },
            };
            self.handle(job_id).await;
        }

        tracing::debug!(worker_id = self.id, "Worker stopped");
    }

    async fn handle(&self, job_id: JobId) {
        let worker_id = self.id;
        tracing::info!(worker_id, job_id = %job_id, "Worker picked up job");

        // TODO: requeue or fail jobs whose processing mark fails instead of leaving them pending.
        let job = match self.registry.mark_processing(job_id).await {
            Ok(job) => job,
            Err(e) => {
                tracing::error!(
                    worker_id,
                    job_id = %job_id,
                    error = %e,
                    "Failed to mark job as processing; job left pending",
                );
                return;
            }
        };

        let outcome = match self.processor.process(&job).await {
            Ok(result) if result.is_empty() => Err(ProcessingError::EmptyResult),
            other => other,
        };

        match outcome {
            Ok(result) => match self.registry.complete(job_id, &result).await {
                Ok(_) => tracing::info!(worker_id, job_id = %job_id, "Job completed"),
                Err(e) => tracing::error!(
                    worker_id,
                    job_id = %job_id,
                    result = %result,
                    error = %e,
                    "Failed to mark job as done; job left processing",
                ),
            },
            Err(processing_error) => {
                tracing::warn!(
                    worker_id,
                    job_id = %job_id,
                    error = %processing_error,
                    "Job processing failed",
                );
                if let Err(e) = self.registry.fail(job_id).await {
                    tracing::error!(
                        worker_id,
                        job_id = %job_id,
                        error = %e,
                        "Failed to mark job as failed; job left processing",
                    );
                }
            }
        }
    }
}
