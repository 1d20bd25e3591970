//! Job lifecycle and worker-pool scheduling engine.
//!
//! ```text
//! submit ─► JobRegistry::create (pending) ─► DispatchQueue::enqueue
//!                                                   │
//!                  ┌────────────────────────────────┘
//!                  ▼
//!   WorkerPool: N loops of dequeue ─► mark_processing ─► JobProcessor ─► complete | fail
//! ```
//!
//! The queue and the pool only ever hold job ids. Every state change goes
//! through [`JobRegistry`], which is the single writer of job rows.

pub mod config;
pub mod pool;
pub mod processor;
pub mod queue;
pub mod registry;

pub use config::WorkerPoolConfig;
pub use pool::{ShutdownReport, WorkerPool, WorkerPoolHandle};
pub use processor::{JobProcessor, ProcessingError, SimulatedProcessor};
pub use queue::{DispatchQueue, QueueError};
pub use registry::{JobRegistry, RegistryError};
