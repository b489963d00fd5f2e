//! Per-dispatch correlation context.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Context shared by every invocation belonging to one event's dispatch.
///
/// A strategy creates one fresh context at the start of each top-level
/// dispatch (one per queued unit in the reentrant-queued strategy) and passes
/// it unchanged to every subscriber invocation for that unit. The engine
/// itself never reads or mutates the attribute bag; it exists so cross-cutting
/// concerns (interception, telemetry) can correlate the invocations of one
/// dispatch and carry state between them.
#[derive(Debug)]
pub struct InterceptorContext {
    dispatch_id: Uuid,
    started_at: DateTime<Utc>,
    attributes: Mutex<HashMap<String, JsonValue>>,
}

impl InterceptorContext {
    pub fn new() -> Self {
        Self {
            dispatch_id: Uuid::now_v7(),
            started_at: Utc::now(),
            attributes: Mutex::new(HashMap::new()),
        }
    }

    /// Unique id of the dispatch unit this context belongs to (UUIDv7,
    /// time-ordered).
    pub fn dispatch_id(&self) -> Uuid {
        self.dispatch_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Stash an attribute for later invocations of the same dispatch unit.
    pub fn put_attribute(&self, key: impl Into<String>, value: JsonValue) {
        // If the lock is poisoned the bag is best-effort; correlation ids
        // remain available either way.
        if let Ok(mut attributes) = self.attributes.lock() {
            attributes.insert(key.into(), value);
        }
    }

    pub fn attribute(&self, key: &str) -> Option<JsonValue> {
        self.attributes
            .lock()
            .ok()
            .and_then(|attributes| attributes.get(key).cloned())
    }
}

impl Default for InterceptorContext {
    fn default() -> Self {
        Self::new()
    }
}
