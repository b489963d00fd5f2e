//! Fan-out executor: best-effort concurrent invocation of parallel
//! subscribers.

use tracing::error;

use signalbus_core::{
    Event, ExpressionEvaluator, InterceptorContext, PendingOutcome, SubscriberRef,
};

use crate::result::DispatchResult;

/// Invoke every eligible parallel subscriber for `event`, then await the
/// pending outcomes in submission order.
///
/// Individual failures (including a handle abandoned by its worker) are
/// recorded and do not stop the remaining awaits; fan-out never
/// short-circuits. Because awaits happen in submission order rather than
/// completion order, the failure left in the result is deterministic for a
/// fixed input order.
pub(crate) fn dispatch_parallel<E: Event>(
    subscribers: &[SubscriberRef<E>],
    event: &E,
    evaluator: &dyn ExpressionEvaluator<E>,
    ctx: &InterceptorContext,
) -> DispatchResult<E> {
    let mut result = DispatchResult::new(event.clone());

    if subscribers.is_empty() {
        return result;
    }

    // Submission phase: collect every pending invocation before awaiting any,
    // so slow subscribers do not delay their siblings' submission.
    let mut pending: Vec<(PendingOutcome, &SubscriberRef<E>)> =
        Vec::with_capacity(subscribers.len());
    for subscriber in subscribers {
        if !subscriber.is_eligible(evaluator, event) {
            continue;
        }
        pending.push((subscriber.invoke_parallel(event, ctx), subscriber));
    }

    for (handle, subscriber) in pending {
        match handle.wait() {
            Ok(()) => result.record_success(subscriber.clone()),
            Err(cause) => {
                error!(
                    event_type = %event.event_type(),
                    subscriber = %subscriber.identity(),
                    error = %cause,
                    "parallel invocation failed"
                );
                result.record_failure(subscriber.identity(), cause);
            }
        }
    }

    result
}
