/// A domain-agnostic event.
///
/// The engine treats events as **opaque**: it never inspects their structure,
/// and only uses the stable type label in diagnostics. Events are cloned into
/// dispatch results and reentrant queues, so they should be cheap to clone
/// (plain data, or wrap large payloads in `Arc`).
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "inventory.item.created").
    fn event_type(&self) -> &'static str;
}
