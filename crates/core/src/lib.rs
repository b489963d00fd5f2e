//! `signalbus-core` — capability contracts for the dispatch engine.
//!
//! This crate contains the **consumed contracts** only (no engine logic):
//! what an event is, what a subscriber can do, how eligibility is decided,
//! and the pending-outcome handle a parallel invocation resolves through.

pub mod error;
pub mod event;
pub mod expression;
pub mod interceptor;
pub mod pending;
pub mod subscriber;

pub use error::InvokeError;
pub use event::Event;
pub use expression::{ExpressionEvaluator, MatchAll};
pub use interceptor::InterceptorContext;
pub use pending::{InvokeOutcome, OutcomeSender, PendingOutcome};
pub use subscriber::{Subscriber, SubscriberRef};
