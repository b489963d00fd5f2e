//! Affinity partitioning of candidate subscribers.

use signalbus_core::SubscriberRef;

/// Split the candidate sequence into (serial, parallel) sets, keeping
/// relative input order within each set.
///
/// The transaction-affinity gate is applied here, before the potentially
/// expensive eligibility check the executors run per subscriber: candidates
/// whose `joins_transaction()` does not match the call are dropped silently.
pub(crate) fn partition_by_affinity<E>(
    subscribers: Vec<SubscriberRef<E>>,
    join_transaction: bool,
) -> (Vec<SubscriberRef<E>>, Vec<SubscriberRef<E>>) {
    let mut serial = Vec::new();
    let mut parallel = Vec::new();

    for subscriber in subscribers {
        if subscriber.joins_transaction() != join_transaction {
            continue;
        }
        if subscriber.is_parallel() {
            parallel.push(subscriber);
        } else {
            serial.push(subscriber);
        }
    }

    (serial, parallel)
}

/// Ascending priority sort for the serial set. Stable: equal priorities keep
/// their input order.
pub(crate) fn sort_serial<E>(serial: &mut [SubscriberRef<E>]) {
    serial.sort_by_key(|subscriber| subscriber.priority());
}
