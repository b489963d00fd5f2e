//! Immediate dispatch: synchronous, recursive, depth-first.

use signalbus_core::{Event, ExpressionEvaluator, InterceptorContext, SubscriberRef};

use crate::result::DispatchResult;
use crate::strategy::{DispatchStrategy, deliver};

/// Strategy that delivers an event synchronously on the calling thread with
/// no intermediate queue.
///
/// Because nothing is deferred, an event posted from inside a handler
/// recurses immediately and completely before control returns to the outer
/// handler: depth-first ordering across nested posts. The dispatcher holds
/// no per-call state beyond the context it hands to the executors.
pub struct ImmediateDispatcher<P> {
    evaluator: P,
}

impl<P> ImmediateDispatcher<P> {
    pub fn new(evaluator: P) -> Self {
        Self { evaluator }
    }
}

impl<E, P> DispatchStrategy<E> for ImmediateDispatcher<P>
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
        let ctx = InterceptorContext::new();
        deliver(&event, subscribers, join_transaction, &self.evaluator, &ctx)
    }
}
