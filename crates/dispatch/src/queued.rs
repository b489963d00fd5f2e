//! Reentrant-queued dispatch: per-thread FIFO, breadth-first across nested
//! posts.

use std::thread;

use tracing::debug;

use signalbus_core::{Event, ExpressionEvaluator, InterceptorContext, SubscriberRef};

use crate::result::DispatchResult;
use crate::session::{QueuedUnit, SessionGuard, SessionMap};
use crate::strategy::{DispatchStrategy, deliver};

/// Strategy that queues events posted reentrantly on a thread that is
/// already dispatching an event.
///
/// All subscribers to a single event A are invoked before any subscriber to
/// an event posted by A's handlers: the nested post only parks a unit in the
/// calling thread's session queue, and the outermost call drains units in
/// strict FIFO order. Threads never share sessions, so independent callers
/// are unaffected by each other's drains.
pub struct QueuedDispatcher<E, P> {
    evaluator: P,
    sessions: SessionMap<E>,
}

impl<E, P> QueuedDispatcher<E, P> {
    pub fn new(evaluator: P) -> Self {
        Self {
            evaluator,
            sessions: SessionMap::new(),
        }
    }
}

impl<E, P> DispatchStrategy<E> for QueuedDispatcher<E, P>
where
    E: Event,
    P: ExpressionEvaluator<E>,
{
    fn dispatch(
        &self,
        event: E,
        subscribers: Vec<SubscriberRef<E>>,
        join_transaction: bool,
    ) -> DispatchResult<E> {
        let thread = thread::current().id();
        let drains = self.sessions.enqueue(
            thread,
            QueuedUnit {
                event: event.clone(),
                subscribers,
            },
        );

        let mut result = DispatchResult::new(event);

        if !drains {
            // Reentrant call from a handler further up this thread's stack:
            // the unit runs later, as a sibling, in the outermost drain, so
            // this call reports nothing for its own unit.
            debug!(
                event_type = %result.event().event_type(),
                "reentrant dispatch deferred to outer drain"
            );
            return result;
        }

        // Queue and draining flag are reset exactly once, when this
        // outermost call exits; the guard covers unwinding handlers too.
        let _session = SessionGuard::new(&self.sessions, thread);

        while let Some(unit) = self.sessions.pop(thread) {
            // Fresh context per unit: interceptors correlate the invocations
            // belonging to one event's dispatch, not the whole drain.
            let ctx = InterceptorContext::new();
            let unit_result = deliver(
                &unit.event,
                unit.subscribers,
                join_transaction,
                &self.evaluator,
                &ctx,
            );
            result = result.merge(unit_result);
        }

        result
    }
}
