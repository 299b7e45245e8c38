//! Trace-context capability: ambient metadata for the current operation.
//!
//! The pipeline consumes trace context, it does not implement propagation.
//! [`ProcessTrace`] covers processes without distributed tracing;
//! [`StaticTrace`] is for tests.

use logpipe_event::Context;

/// Exposes the identifier and field snapshot of the active trace.
pub trait TraceContext: Send + Sync {
    /// Identifier of the currently active trace.
    fn active_id(&self) -> String;

    /// Deep-cloned copy of the ambient trace fields. Each event gets its
    /// own copy, decoupled from later mutation of the live trace.
    fn active_snapshot(&self) -> Context;
}

/// One trace id for the lifetime of the process, empty snapshot.
pub struct ProcessTrace {
    id: String,
}

impl ProcessTrace {
    pub fn new() -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
        }
    }
}

impl Default for ProcessTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceContext for ProcessTrace {
    fn active_id(&self) -> String {
        self.id.clone()
    }

    fn active_snapshot(&self) -> Context {
        Context::new()
    }
}

/// Fixed trace id and snapshot, for tests.
pub struct StaticTrace {
    id: String,
    snapshot: Context,
}

impl StaticTrace {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            snapshot: Context::new(),
        }
    }

    /// Adds a field to the snapshot.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.snapshot.insert(key.into(), value);
        self
    }
}

impl TraceContext for StaticTrace {
    fn active_id(&self) -> String {
        self.id.clone()
    }

    fn active_snapshot(&self) -> Context {
        self.snapshot.clone()
    }
}
