//! Pending-outcome handles for parallel invocations.
//!
//! A parallel subscriber does not run on the dispatching thread; its
//! invocation returns a [`PendingOutcome`] that resolves to success or
//! failure exactly once. The executor that actually runs the work (a worker
//! pool, a dedicated thread) holds the paired [`OutcomeSender`].

use std::sync::mpsc;
use std::thread;

use crate::error::InvokeError;

/// Outcome of a single subscriber invocation.
pub type InvokeOutcome = Result<(), InvokeError>;

/// Completion side of a pending invocation. Resolves the paired
/// [`PendingOutcome`] exactly once; dropping it unresolved surfaces as
/// [`InvokeError::Canceled`] on the waiting side.
#[derive(Debug)]
pub struct OutcomeSender {
    tx: mpsc::Sender<InvokeOutcome>,
}

impl OutcomeSender {
    /// Resolve the paired handle. A receiver that already went away is
    /// ignored; nobody is waiting for the verdict anymore.
    pub fn complete(self, outcome: InvokeOutcome) {
        let _ = self.tx.send(outcome);
    }
}

/// Handle to a parallel invocation that has been submitted but not yet
/// awaited.
#[derive(Debug)]
pub struct PendingOutcome {
    rx: mpsc::Receiver<InvokeOutcome>,
}

impl PendingOutcome {
    /// Create an unresolved handle plus its completion side.
    pub fn channel() -> (Self, OutcomeSender) {
        let (tx, rx) = mpsc::channel();
        (Self { rx }, OutcomeSender { tx })
    }

    /// A handle that is already resolved.
    pub fn ready(outcome: InvokeOutcome) -> Self {
        let (handle, sender) = Self::channel();
        sender.complete(outcome);
        handle
    }

    /// Run `work` on a dedicated named thread and resolve the handle with its
    /// result. Convenience for small-scale use; high-volume callers should
    /// submit to a worker pool instead.
    pub fn spawn<F>(name: impl Into<String>, work: F) -> Self
    where
        F: FnOnce() -> InvokeOutcome + Send + 'static,
    {
        let (handle, sender) = Self::channel();
        thread::Builder::new()
            .name(name.into())
            .spawn(move || sender.complete(work()))
            .expect("failed to spawn invocation thread");
        handle
    }

    /// Block until the invocation resolves.
    ///
    /// If the executing side disappears without completing (worker thread
    /// died, pool shut down), this yields [`InvokeError::Canceled`] rather
    /// than blocking forever.
    pub fn wait(self) -> InvokeOutcome {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            Err(mpsc::RecvError) => Err(InvokeError::Canceled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_resolves_immediately() {
        assert!(PendingOutcome::ready(Ok(())).wait().is_ok());

        let failed = PendingOutcome::ready(Err(InvokeError::handler("boom"))).wait();
        assert!(matches!(failed, Err(InvokeError::Handler(_))));
    }

    #[test]
    fn dropped_sender_surfaces_as_canceled() {
        let (handle, sender) = PendingOutcome::channel();
        drop(sender);

        assert!(matches!(handle.wait(), Err(InvokeError::Canceled)));
    }

    #[test]
    fn spawned_work_resolves_the_handle() {
        let handle = PendingOutcome::spawn("test-invoke", || Ok(()));
        assert!(handle.wait().is_ok());
    }
}
