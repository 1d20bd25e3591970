//! Bounded in-memory FIFO of job ids awaiting a worker.
//!
//! Backed by a `tokio::sync::mpsc` channel whose receiver is shared behind
//! a mutex, so any number of producers and consumers can use one queue.
//!
//! Contract: every enqueued id is delivered to exactly one `dequeue`
//! caller. Once handed out, an id's progress is tracked only through the
//! job's stored status; the queue keeps no record of in-flight ids.

use jobq_core::types::JobId;
use tokio::sync::{mpsc, Mutex};

/// Errors returned by [`DispatchQueue`] operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The queue was closed and accepts no more ids.
    #[error("Dispatch queue is closed")]
    Closed,
}

/// Bounded, concurrency-safe queue of job ids.
pub struct DispatchQueue {
    tx: mpsc::Sender<JobId>,
    rx: Mutex<mpsc::Receiver<JobId>>,
    capacity: usize,
}

impl DispatchQueue {
    /// Create a queue holding at most `capacity` ids (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Mutex::new(rx),
            capacity,
        }
    }

    /// Maximum number of buffered ids.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an id, waiting while the queue is full.
    ///
    /// Waiting here is the submission path's backpressure: callers stall
    /// until a worker frees a slot.
    pub async fn enqueue(&self, id: JobId) -> Result<(), QueueError> {
        self.tx.send(id).await.map_err(|_| QueueError::Closed)?;
        tracing::debug!(job_id = %id, "Job enqueued for processing");
        Ok(())
    }

    /// Take the oldest id, waiting until one is available.
    ///
    /// Returns `None` once the queue is closed and empty. Cancel-safe:
    /// dropping the returned future never loses an id.
    pub async fn dequeue(&self) -> Option<JobId> {
        self.rx.lock().await.recv().await
    }

    /// Stop accepting ids and return whatever was still buffered.
    ///
    /// Pending and future `enqueue` calls fail with [`QueueError::Closed`].
    /// A consumer parked in [`dequeue`](Self::dequeue) holds the receiver,
    /// so call this only after consumers have stopped.
    pub async fn close(&self) -> Vec<JobId> {
        let mut rx = self.rx.lock().await;
        rx.close();

        let mut remaining = Vec::new();
        while let Ok(id) = rx.try_recv() {
            remaining.push(id);
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use assert_matches::assert_matches;
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn preserves_fifo_order() {
        let queue = DispatchQueue::new(8);
        let ids: Vec<JobId> = (0..5).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            queue.enqueue(*id).await.unwrap();
        }

        let mut out = Vec::new();
        for _ in 0..ids.len() {
            out.push(queue.dequeue().await.unwrap());
        }
        assert_eq!(out, ids);
    }

    #[tokio::test]
    async fn zero_capacity_is_raised_to_one() {
        let queue = DispatchQueue::new(0);
        assert_eq!(queue.capacity(), 1);
        queue.enqueue(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn enqueue_on_full_queue_waits_for_dequeue() {
        let queue = Arc::new(DispatchQueue::new(1));
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        queue.enqueue(first).await.unwrap();

        // Saturated: a bounded wait must time out.
        let blocked = tokio::time::timeout(Duration::from_millis(50), queue.enqueue(second)).await;
        assert!(blocked.is_err(), "enqueue on a full queue should block");

        let producer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move {
                let start = Instant::now();
                queue.enqueue(second).await.unwrap();
                start.elapsed()
            })
        };

        let dequeue_after = Duration::from_millis(200);
        tokio::time::sleep(dequeue_after).await;
        assert_eq!(queue.dequeue().await, Some(first));

        let waited = producer.await.unwrap();
        assert!(
            waited >= dequeue_after,
            "producer returned after {waited:?}, before the slot was freed"
        );
        assert_eq!(queue.dequeue().await, Some(second));
    }

    #[tokio::test(start_paused = true)]
    async fn dequeue_waits_until_an_id_arrives() {
        let queue = Arc::new(DispatchQueue::new(4));
        let id = Uuid::new_v4();

        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.dequeue().await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!consumer.is_finished());

        queue.enqueue(id).await.unwrap();
        assert_eq!(consumer.await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn close_returns_buffered_ids_and_rejects_new_ones() {
        let queue = DispatchQueue::new(4);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        queue.enqueue(a).await.unwrap();
        queue.enqueue(b).await.unwrap();

        assert_eq!(queue.close().await, vec![a, b]);
        assert_matches!(queue.enqueue(Uuid::new_v4()).await, Err(QueueError::Closed));
        assert_eq!(queue.dequeue().await, None);
    }

    #[tokio::test]
    async fn each_id_is_delivered_to_exactly_one_consumer() {
        let queue = Arc::new(DispatchQueue::new(16));
        let ids: Vec<JobId> = (0..64).map(|_| Uuid::new_v4()).collect();
        let delivered = Arc::new(AtomicUsize::new(0));
        let stop = CancellationToken::new();

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                let delivered = Arc::clone(&delivered);
                let stop = stop.clone();
                tokio::spawn(async move {
                    let mut seen = Vec::new();
                    loop {
                        tokio::select! {
                            _ = stop.cancelled() => break,
                            next = queue.dequeue() => match next {
                                Some(id) => {
                                    seen.push(id);
                                    delivered.fetch_add(1, Ordering::SeqCst);
                                }
                                None => break,
                            },
                        }
                    }
                    seen
                })
            })
            .collect();

        for id in &ids {
            queue.enqueue(*id).await.unwrap();
        }
        while delivered.load(Ordering::SeqCst) < ids.len() {
            tokio::task::yield_now().await;
        }
        stop.cancel();

        let mut all = Vec::new();
        for consumer in consumers {
            all.extend(consumer.await.unwrap());
        }
        all.sort();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(all, expected);
    }
}
