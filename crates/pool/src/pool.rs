//! Fixed-size invoker pool with graceful shutdown.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;

use tracing::{debug, warn};

use signalbus_core::{InvokeError, InvokeOutcome, OutcomeSender, PendingOutcome};

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Thread-name prefix, for logging.
    pub name: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            name: "invoker-pool".to_string(),
        }
    }
}

impl PoolConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Pool runtime statistics.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PoolStats {
    pub submitted: u64,
    pub completed: u64,
    pub failed: u64,
}

type Invocation = Box<dyn FnOnce() -> InvokeOutcome + Send + 'static>;

struct QueuedInvocation {
    run: Invocation,
    outcome: OutcomeSender,
}

/// Fixed-size worker pool producing [`PendingOutcome`] handles.
///
/// Work is fed through a single channel that all workers drain. Shutting the
/// pool down closes the feed; workers finish whatever is still queued before
/// exiting, so no accepted invocation is silently lost.
pub struct InvokerPool {
    feed: mpsc::Sender<QueuedInvocation>,
    workers: Vec<thread::JoinHandle<()>>,
    stats: Arc<Mutex<PoolStats>>,
}

impl InvokerPool {
    pub fn new(config: PoolConfig) -> Self {
        let (feed, rx) = mpsc::channel::<QueuedInvocation>();
        let rx = Arc::new(Mutex::new(rx));
        let stats = Arc::new(Mutex::new(PoolStats::default()));

        let worker_count = config.workers.max(1);
        let mut workers = Vec::with_capacity(worker_count);
        for n in 0..worker_count {
            let rx = rx.clone();
            let stats = stats.clone();
            let handle = thread::Builder::new()
                .name(format!("{}-{n}", config.name))
                .spawn(move || worker_loop(rx, stats))
                .expect("failed to spawn pool worker thread");
            workers.push(handle);
        }

        Self {
            feed,
            workers,
            stats,
        }
    }

    /// Submit an invocation; the returned handle resolves once a worker ran
    /// it.
    pub fn submit<F>(&self, work: F) -> PendingOutcome
    where
        F: FnOnce() -> InvokeOutcome + Send + 'static,
    {
        let (handle, outcome) = PendingOutcome::channel();

        {
            let mut stats = self.stats.lock().unwrap();
            stats.submitted += 1;
        }

        // If every worker is gone the send fails and drops the outcome
        // sender, which resolves the handle as canceled.
        let _ = self.feed.send(QueuedInvocation {
            run: Box::new(work),
            outcome,
        });

        handle
    }

    /// Snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        self.stats.lock().unwrap().clone()
    }

    /// Stop accepting work, let queued invocations drain, and join the
    /// workers.
    pub fn shutdown(self) {
        drop(self.feed);
        for worker in self.workers {
            let _ = worker.join();
        }
    }
}

fn worker_loop(rx: Arc<Mutex<mpsc::Receiver<QueuedInvocation>>>, stats: Arc<Mutex<PoolStats>>) {
    debug!("pool worker started");

    loop {
        // Hold the feed lock only while receiving, never while running work.
        let next = {
            let feed = rx.lock().unwrap();
            feed.recv()
        };
        let Ok(queued) = next else {
            break;
        };

        let QueuedInvocation { run, outcome } = queued;
        let result = match catch_unwind(AssertUnwindSafe(run)) {
            Ok(result) => result,
            Err(_) => {
                warn!("invocation panicked; reporting as canceled");
                Err(InvokeError::Canceled)
            }
        };

        {
            let mut stats = stats.lock().unwrap();
            stats.completed += 1;
            if result.is_err() {
                stats.failed += 1;
            }
        }

        outcome.complete(result);
    }

    debug!("pool worker stopped");
}
