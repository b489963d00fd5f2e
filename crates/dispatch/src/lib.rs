//! `signalbus-dispatch` — the dispatch engine of an in-process event bus.
//!
//! Given one event and the candidate subscribers registered for it, a
//! dispatch strategy decides ordering and execution path, runs the two
//! executors, and folds the outcome into a single [`DispatchResult`]:
//!
//! ```text
//! dispatch(event, candidates, join_transaction)
//!     |
//!     |-- affinity gate: joins_transaction() == join_transaction
//!     |
//!     |-- parallel set --> fan-out executor: submit all, await in
//!     |                    submission order (best-effort, no short-circuit)
//!     |
//!     `-- serial set ----> serial executor: ascending priority, fail-fast
//!
//! result = fan-out result merged with serial result
//!          (success sets union; last reported failure wins)
//! ```
//!
//! Two strategies exist:
//!
//! - [`ImmediateDispatcher`]: events posted from inside a handler recurse
//!   immediately and completely before the posting handler's frame returns
//!   (depth-first).
//! - [`QueuedDispatcher`]: reentrant posts are parked in a per-calling-thread
//!   FIFO and drained by the outermost call (breadth-first).
//!
//! Subscriber-level failures never escape `dispatch`; they are captured in
//! the returned result and logged for diagnostics. Callers inspect the
//! result's failure field to decide business-level behavior (compensation,
//! alerting, and so on).

mod fanout;
mod immediate;
mod partition;
mod queued;
mod result;
mod serial;
mod session;
mod strategy;

#[cfg(test)]
mod testutil;

pub use immediate::ImmediateDispatcher;
pub use queued::QueuedDispatcher;
pub use result::{DispatchFailure, DispatchResult};
pub use strategy::{DispatchStrategy, immediate, per_thread_queue};
