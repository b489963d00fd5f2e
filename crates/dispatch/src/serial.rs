//! Serial executor: one-at-a-time invocation on the calling thread,
//! fail-fast.

use tracing::error;

use signalbus_core::{Event, ExpressionEvaluator, InterceptorContext, SubscriberRef};

use crate::result::DispatchResult;

/// Invoke the (already priority-sorted) serial subscribers for `event`, one
/// at a time, stopping at the first failure.
///
/// On failure the batch's earlier success entries are discarded from the
/// result: serial subscribers are typically transaction-joined, and an
/// ordering-dependent failure invalidates the batch's reportable success
/// record even though earlier side effects already occurred. Remaining
/// subscribers in the batch are not invoked.
pub(crate) fn dispatch_serial<E: Event>(
    subscribers: &[SubscriberRef<E>],
    event: &E,
    evaluator: &dyn ExpressionEvaluator<E>,
    ctx: &InterceptorContext,
) -> DispatchResult<E> {
    let mut result = DispatchResult::new(event.clone());

    if subscribers.is_empty() {
        return result;
    }

    for subscriber in subscribers {
        if !subscriber.is_eligible(evaluator, event) {
            continue;
        }
        match subscriber.invoke_serial(event, ctx) {
            Ok(()) => result.record_success(subscriber.clone()),
            Err(cause) => {
                error!(
                    event_type = %event.event_type(),
                    subscriber = %subscriber.identity(),
                    error = %cause,
                    "serial invocation failed; aborting batch"
                );
                result.record_failure(subscriber.identity(), cause);
                result.clear_successes();
                break;
            }
        }
    }

    result
}
