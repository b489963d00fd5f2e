//! Dispatch strategy abstraction and factories.

use signalbus_core::{Event, ExpressionEvaluator, InterceptorContext, SubscriberRef};

use crate::fanout::dispatch_parallel;
use crate::immediate::ImmediateDispatcher;
use crate::partition::{partition_by_affinity, sort_serial};
use crate::queued::QueuedDispatcher;
use crate::result::DispatchResult;
use crate::serial::dispatch_serial;

/// A dispatch strategy delivers one event to its candidate subscribers and
/// aggregates the outcome.
///
/// The candidate sequence is consumed once, front-to-back. Every candidate
/// whose transaction affinity matches `join_transaction` and whose
/// eligibility check passes is invoked exactly once (success or failure)
/// under the strategy's ordering rules. Subscriber-level failures are
/// captured in the returned result, never raised past this call.
pub trait DispatchStrategy<E: Event>: Send + Sync {
    fn dispatch(
        &self,
        event: E,
        subscribers: Vec<SubscriberRef<E>>,
        join_transaction: bool,
    ) -> DispatchResult<E>;
}

/// Strategy that dispatches events to subscribers immediately as they are
/// posted, without an intermediate queue: an event posted from inside a
/// handler is delivered fully before the posting handler's frame returns.
/// Depth-first, versus breadth-first for [`per_thread_queue`].
pub fn immediate<P>(evaluator: P) -> ImmediateDispatcher<P> {
    ImmediateDispatcher::new(evaluator)
}

/// Strategy that queues events posted reentrantly on a thread that is
/// already dispatching, guaranteeing that all events posted on a single
/// thread are delivered to all subscribers in the order they are posted:
/// breadth-first on each thread.
pub fn per_thread_queue<E, P>(evaluator: P) -> QueuedDispatcher<E, P>
where
    E: Event,
    P: ExpressionEvaluator<E>,
{
    QueuedDispatcher::new(evaluator)
}

/// Deliver one event to one candidate set: affinity partition, priority
/// sort, fan-out, then the serial batch, merged in that call order (a serial
/// failure is the later, winning diagnostic).
pub(crate) fn deliver<E, P>(
    event: &E,
    subscribers: Vec<SubscriberRef<E>>,
    join_transaction: bool,
    evaluator: &P,
    ctx: &InterceptorContext,
) -> DispatchResult<E>
where
    E: Event,
    P: ExpressionEvaluator<E>,
{
    let (mut serial, parallel) = partition_by_affinity(subscribers, join_transaction);
    sort_serial(&mut serial);

    let fanned_out = dispatch_parallel(&parallel, event, evaluator, ctx);
    let serial_batch = dispatch_serial(&serial, event, evaluator, ctx);

    fanned_out.merge(serial_batch)
}
