//! Per-thread dispatch sessions for the reentrant-queued strategy.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::thread::ThreadId;

use signalbus_core::SubscriberRef;

/// One reentrantly-posted event waiting its turn in a thread's queue.
pub(crate) struct QueuedUnit<E> {
    pub(crate) event: E,
    pub(crate) subscribers: Vec<SubscriberRef<E>>,
}

/// Reentrancy state for one calling thread: the FIFO of queued units plus
/// the draining flag that turns nested posts into breadth-first siblings.
struct DispatchSession<E> {
    draining: bool,
    queue: VecDeque<QueuedUnit<E>>,
}

impl<E> DispatchSession<E> {
    fn new() -> Self {
        Self {
            draining: false,
            queue: VecDeque::new(),
        }
    }
}

/// Sessions keyed by calling thread.
///
/// Each entry is only ever touched by its owning thread; the mutex guards
/// the map's shape. It is never held across a subscriber invocation, so
/// handlers are free to reenter `dispatch` on the same thread.
pub(crate) struct SessionMap<E> {
    sessions: Mutex<HashMap<ThreadId, DispatchSession<E>>>,
}

impl<E> SessionMap<E> {
    pub(crate) fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Queue `unit` for `thread`. Returns true when this call must drain:
    /// the session was idle and has now been marked draining.
    pub(crate) fn enqueue(&self, thread: ThreadId, unit: QueuedUnit<E>) -> bool {
        let mut sessions = self.lock();
        let session = sessions
            .entry(thread)
            .or_insert_with(DispatchSession::new);
        session.queue.push_back(unit);

        if session.draining {
            false
        } else {
            session.draining = true;
            true
        }
    }

    /// Pop the next unit of `thread`'s queue, if any.
    pub(crate) fn pop(&self, thread: ThreadId) -> Option<QueuedUnit<E>> {
        self.lock()
            .get_mut(&thread)
            .and_then(|session| session.queue.pop_front())
    }

    /// Drop `thread`'s session entirely: queue and draining flag reset in
    /// one step, exactly once per outermost drain.
    pub(crate) fn release(&self, thread: ThreadId) {
        // Tolerate poisoning: release also runs while unwinding.
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(&thread);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_idle(&self, thread: ThreadId) -> bool {
        !self.lock().contains_key(&thread)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ThreadId, DispatchSession<E>>> {
        self.sessions.lock().expect("dispatch session lock poisoned")
    }
}

/// Releases a thread's session when the outermost drain exits, unwinding
/// included, so the thread's next dispatch starts from a clean session.
pub(crate) struct SessionGuard<'a, E> {
    map: &'a SessionMap<E>,
    thread: ThreadId,
}

impl<'a, E> SessionGuard<'a, E> {
    pub(crate) fn new(map: &'a SessionMap<E>, thread: ThreadId) -> Self {
        Self { map, thread }
    }
}

impl<E> Drop for SessionGuard<'_, E> {
    fn drop(&mut self) {
        self.map.release(self.thread);
    }
}
