//! Shared fixtures for the engine's unit tests.

use std::sync::{Arc, Mutex};

use signalbus_core::{
    Event, InterceptorContext, InvokeError, PendingOutcome, Subscriber, SubscriberRef,
};

/// Shared invocation log, in invocation order.
pub(crate) type Journal = Arc<Mutex<Vec<String>>>;

pub(crate) fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

#[derive(Debug, Clone)]
pub(crate) struct TestEvent {
    pub(crate) name: &'static str,
}

impl Event for TestEvent {
    fn event_type(&self) -> &'static str {
        self.name
    }
}

type InvokeHook = Box<dyn Fn(&TestEvent, &InterceptorContext) + Send + Sync>;

/// Configurable subscriber that records its invocations into a journal.
pub(crate) struct TestSubscriber {
    identity: String,
    parallel: bool,
    priority: i32,
    joins_transaction: bool,
    subscription: Option<String>,
    fail: bool,
    journal: Journal,
    hook: Option<InvokeHook>,
}

impl TestSubscriber {
    pub(crate) fn serial(identity: impl Into<String>, journal: &Journal) -> Self {
        Self {
            identity: identity.into(),
            parallel: false,
            priority: 0,
            joins_transaction: false,
            subscription: None,
            fail: false,
            journal: journal.clone(),
            hook: None,
        }
    }

    pub(crate) fn parallel(identity: impl Into<String>, journal: &Journal) -> Self {
        Self {
            parallel: true,
            ..Self::serial(identity, journal)
        }
    }

    pub(crate) fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn joining_transaction(mut self) -> Self {
        self.joins_transaction = true;
        self
    }

    pub(crate) fn with_subscription(mut self, expression: impl Into<String>) -> Self {
        self.subscription = Some(expression.into());
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Run `hook` inside every invocation (reentrancy scenarios).
    pub(crate) fn on_invoke<F>(mut self, hook: F) -> Self
    where
        F: Fn(&TestEvent, &InterceptorContext) + Send + Sync + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    pub(crate) fn build(self) -> SubscriberRef<TestEvent> {
        Arc::new(self)
    }

    fn run(&self, event: &TestEvent, ctx: &InterceptorContext) -> Result<(), InvokeError> {
        self.journal.lock().unwrap().push(self.identity.clone());
        if let Some(hook) = &self.hook {
            hook(event, ctx);
        }
        if self.fail {
            Err(InvokeError::handler(format!("{} failed", self.identity)))
        } else {
            Ok(())
        }
    }
}

impl Subscriber<TestEvent> for TestSubscriber {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn is_parallel(&self) -> bool {
        self.parallel
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn joins_transaction(&self) -> bool {
        self.joins_transaction
    }

    fn subscription(&self) -> Option<&str> {
        self.subscription.as_deref()
    }

    fn invoke_serial(&self, event: &TestEvent, ctx: &InterceptorContext) -> Result<(), InvokeError> {
        self.run(event, ctx)
    }

    fn invoke_parallel(&self, event: &TestEvent, ctx: &InterceptorContext) -> PendingOutcome {
        // Unit tests resolve synchronously; the await-order semantics under
        // real concurrency are covered by the black-box suite with a pool.
        PendingOutcome::ready(self.run(event, ctx))
    }
}
