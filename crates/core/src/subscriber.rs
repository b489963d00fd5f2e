//! Subscriber capability contract.

use std::sync::Arc;

use crate::error::InvokeError;
use crate::expression::ExpressionEvaluator;
use crate::interceptor::InterceptorContext;
use crate::pending::PendingOutcome;

/// Shared handle to a registered subscriber. The engine references
/// subscribers, it never owns them.
pub type SubscriberRef<E> = Arc<dyn Subscriber<E>>;

/// A registered handler capability, serial or parallel.
///
/// Every subscriber exposes both invocation entry points; the capability tag
/// returned by [`is_parallel`](Self::is_parallel) decides which one the
/// engine uses. Invocation is idempotent from the engine's point of view:
/// the engine invokes each eligible subscriber exactly once per dispatch and
/// never retries.
pub trait Subscriber<E>: Send + Sync {
    /// Diagnostic label used in log lines and failure reports.
    fn identity(&self) -> &str;

    /// Capability tag: parallel subscribers fan out through pending handles,
    /// serial subscribers run on the dispatching thread.
    fn is_parallel(&self) -> bool {
        false
    }

    /// Ordering key among serial peers; lower runs first. Not meaningful for
    /// parallel subscribers.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this subscriber runs only when the dispatch joins an active
    /// transaction (`true`) or only outside one (`false`).
    fn joins_transaction(&self) -> bool {
        false
    }

    /// Filter expression this subscriber registered with, if any.
    fn subscription(&self) -> Option<&str> {
        None
    }

    /// Whether this subscriber wants `event`.
    ///
    /// Default: no registered expression means always eligible; otherwise the
    /// externally supplied evaluator decides. Checked after the (cheaper)
    /// transaction-affinity gate.
    fn is_eligible(&self, evaluator: &dyn ExpressionEvaluator<E>, event: &E) -> bool {
        match self.subscription() {
            Some(expression) => evaluator.evaluate(expression, event),
            None => true,
        }
    }

    /// Invoke on the calling thread, returning when the handler finishes.
    fn invoke_serial(&self, event: &E, ctx: &InterceptorContext) -> Result<(), InvokeError>;

    /// Submit the invocation for asynchronous execution, returning a handle
    /// that resolves when it completes.
    fn invoke_parallel(&self, event: &E, ctx: &InterceptorContext) -> PendingOutcome;
}
