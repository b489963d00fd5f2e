//! `signalbus-pool` — worker pool for parallel subscriber invocations.
//!
//! The dispatch engine awaits [`PendingOutcome`](signalbus_core::PendingOutcome)
//! handles; it does not own the executor that produces them. This crate is
//! one such executor: a fixed-size pool of named worker threads that turns
//! submitted closures into pending handles. Parallel subscribers typically
//! hold a shared pool and submit their work from `invoke_parallel`.

mod pool;

pub use pool::{InvokerPool, PoolConfig, PoolStats};
