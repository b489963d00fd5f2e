//! Outcome accumulator for one dispatch call.

use core::fmt;
use std::sync::Arc;

use signalbus_core::{InvokeError, SubscriberRef};

/// The captured failure of a dispatch: the cause plus the subscriber that
/// raised it. Diagnostic state, not transactional state.
#[derive(Debug)]
pub struct DispatchFailure {
    subscriber: String,
    cause: InvokeError,
}

impl DispatchFailure {
    fn new(subscriber: impl Into<String>, cause: InvokeError) -> Self {
        Self {
            subscriber: subscriber.into(),
            cause,
        }
    }

    /// Identity of the subscriber whose invocation failed.
    pub fn subscriber(&self) -> &str {
        &self.subscriber
    }

    pub fn cause(&self) -> &InvokeError {
        &self.cause
    }
}

/// Records, for one dispatch call (and its queued/recursive sub-calls),
/// which subscribers completed successfully and the most recent failure.
///
/// A subscriber appears in the success set only if its invocation returned
/// normally. The set is insertion-ordered with set semantics by subscriber
/// handle: recording the same handle twice keeps its first position.
pub struct DispatchResult<E> {
    event: E,
    succeeded: Vec<SubscriberRef<E>>,
    failure: Option<DispatchFailure>,
}

impl<E> DispatchResult<E> {
    pub fn new(event: E) -> Self {
        Self {
            event,
            succeeded: Vec::new(),
            failure: None,
        }
    }

    /// The event this dispatch delivered.
    pub fn event(&self) -> &E {
        &self.event
    }

    /// Subscribers that completed successfully, in invocation order.
    pub fn succeeded(&self) -> &[SubscriberRef<E>] {
        &self.succeeded
    }

    /// The captured failure, if any invocation failed.
    pub fn failure(&self) -> Option<&DispatchFailure> {
        self.failure.as_ref()
    }

    /// True when no failure was recorded.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Add a subscriber to the success set (idempotent per handle).
    pub fn record_success(&mut self, subscriber: SubscriberRef<E>) {
        if !self.contains(&subscriber) {
            self.succeeded.push(subscriber);
        }
    }

    /// Capture a failure. A later failure overwrites an earlier one: the
    /// field reports the most recent diagnostic, not the first.
    pub fn record_failure(&mut self, subscriber: &str, cause: InvokeError) {
        self.failure = Some(DispatchFailure::new(subscriber, cause));
    }

    /// Discard the success entries recorded so far. Used when a serial batch
    /// fails part-way: the batch's reportable success record is invalidated
    /// even though earlier side effects already happened.
    pub(crate) fn clear_successes(&mut self) {
        self.succeeded.clear();
    }

    /// Merge `later` into this result. Success sets union (first appearance
    /// keeps its position); `later`'s failure, if present, replaces this
    /// one's: last reported failure wins.
    pub fn merge(mut self, later: DispatchResult<E>) -> DispatchResult<E> {
        for subscriber in later.succeeded {
            if !self.contains(&subscriber) {
                self.succeeded.push(subscriber);
            }
        }
        if later.failure.is_some() {
            self.failure = later.failure;
        }
        self
    }

    fn contains(&self, subscriber: &SubscriberRef<E>) -> bool {
        self.succeeded.iter().any(|s| Arc::ptr_eq(s, subscriber))
    }
}

impl<E: fmt::Debug> fmt::Debug for DispatchResult<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchResult")
            .field("event", &self.event)
            .field(
                "succeeded",
                &self
                    .succeeded
                    .iter()
                    .map(|s| s.identity().to_string())
                    .collect::<Vec<_>>(),
            )
            .field("failure", &self.failure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{TestEvent, TestSubscriber, journal};
    use signalbus_core::InvokeError;

    fn subscriber(identity: &str) -> SubscriberRef<TestEvent> {
        TestSubscriber::serial(identity, &journal()).build()
    }

    #[test]
    fn success_set_is_insertion_ordered_and_deduplicated() {
        let a = subscriber("a");
        let b = subscriber("b");

        let mut result = DispatchResult::new(TestEvent { name: "ev" });
        result.record_success(a.clone());
        result.record_success(b.clone());
        result.record_success(a.clone());

        let ids: Vec<_> = result.succeeded().iter().map(|s| s.identity()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn later_failure_overwrites_earlier() {
        let mut result = DispatchResult::new(TestEvent { name: "ev" });
        result.record_failure("first", InvokeError::handler("first cause"));
        result.record_failure("second", InvokeError::handler("second cause"));

        assert_eq!(result.failure().unwrap().subscriber(), "second");
    }

    #[test]
    fn merge_unions_successes_and_takes_later_failure() {
        let a = subscriber("a");
        let b = subscriber("b");

        let mut left = DispatchResult::new(TestEvent { name: "ev" });
        left.record_success(a.clone());

        let mut right = DispatchResult::new(TestEvent { name: "ev" });
        right.record_success(b.clone());
        right.record_failure("b", InvokeError::handler("boom"));

        let merged = left.merge(right);
        let ids: Vec<_> = merged.succeeded().iter().map(|s| s.identity()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(merged.failure().unwrap().subscriber(), "b");
        assert!(!merged.is_success());
    }

    #[test]
    fn merge_keeps_the_earlier_event() {
        let left = DispatchResult::new(TestEvent { name: "outer" });
        let right = DispatchResult::new(TestEvent { name: "nested" });

        assert_eq!(left.merge(right).event().name, "outer");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn identities<E>(result: &DispatchResult<E>) -> Vec<String> {
            let mut ids: Vec<_> = result
                .succeeded()
                .iter()
                .map(|s| s.identity().to_string())
                .collect();
            ids.sort();
            ids
        }

        proptest! {
            #[test]
            fn merge_is_commutative_on_success_sets(
                left in prop::collection::vec(0usize..8, 0..12),
                right in prop::collection::vec(0usize..8, 0..12),
            ) {
                let journal = journal();
                let pool: Vec<SubscriberRef<TestEvent>> = (0..8)
                    .map(|n| TestSubscriber::serial(format!("s{n}"), &journal).build())
                    .collect();

                let build = |picks: &[usize]| {
                    let mut result = DispatchResult::new(TestEvent { name: "merge.prop" });
                    for &i in picks {
                        result.record_success(pool[i].clone());
                    }
                    result
                };

                let ab = build(&left).merge(build(&right));
                let ba = build(&right).merge(build(&left));

                prop_assert_eq!(identities(&ab), identities(&ba));
            }
        }
    }
}
