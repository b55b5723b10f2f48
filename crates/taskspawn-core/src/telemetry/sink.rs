//! Analytics sink contract

use serde_json::{Map, Value};

/// Attribute map attached to a single instrumentation event.
pub type EventAttrs = Map<String, Value>;

/// Destination for instrumentation events.
///
/// The facade emits exactly one `emit` call per event. Implementations must
/// not fail; delivery, batching and wire format are their concern entirely.
pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: &str, attributes: EventAttrs);
}

/// Sink that drops every event. Useful for embedding the facade without an
/// analytics backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AnalyticsSink for NullSink {
    fn emit(&self, _event: &str, _attributes: EventAttrs) {}
}
