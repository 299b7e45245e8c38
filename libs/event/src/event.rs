//! The log-event record: pre-validation candidate and immutable event.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Level;

/// Ordered string-to-value mapping carried by every event.
///
/// Backed by `serde_json::Map` with the `preserve_order` feature, so keys
/// render in insertion order.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// A raw event record assembled by the pipeline, before validation.
///
/// `level` is a plain string here; membership in the level set is checked
/// by [`Validator::validate`](crate::Validator::validate).
#[derive(Debug, Clone, Default)]
pub struct EventCandidate {
    pub module: String,
    pub level: String,
    pub message: String,
    pub context: Context,
    pub trace: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub caller: String,
    pub subject: String,
}

/// An immutable, validated log event.
///
/// The only way to construct one is through
/// [`Validator::validate`](crate::Validator::validate); fields are private
/// and never change afterwards. The context has already had redacted keys
/// removed, and `subject` is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    module: String,
    level: Level,
    message: String,
    context: Context,
    trace: String,
    timestamp: DateTime<Utc>,
    caller: String,
    subject: String,
}

impl LogEvent {
    /// Crate-internal constructor, used by the validator once every rule
    /// has passed.
    pub(crate) fn from_validated(candidate: EventCandidate, level: Level) -> Self {
        Self {
            module: candidate.module,
            level,
            message: candidate.message,
            context: candidate.context,
            trace: candidate.trace,
            // Presence is a validation rule, checked before this point.
            timestamp: candidate.timestamp.unwrap_or_else(Utc::now),
            caller: candidate.caller,
            subject: candidate.subject,
        }
    }

    /// Name of the component that emitted the event.
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Enriched, redacted context mapping. May be empty.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Opaque identifier of the trace this event belongs to.
    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Source location descriptor, `file:line`.
    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// The entity this event is about: a resolved node identity, or the
    /// literal `"server"` when resolution did not apply or failed.
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_preserves_insertion_order() {
        let mut context = Context::new();
        context.insert("zeta".to_string(), serde_json::json!(1));
        context.insert("alpha".to_string(), serde_json::json!(2));

        let keys: Vec<&String> = context.keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_event_serializes_with_lowercase_level() {
        let event = LogEvent::from_validated(
            EventCandidate {
                module: "scheduler".to_string(),
                level: "warn".to_string(),
                message: "queue depth high".to_string(),
                context: Context::new(),
                trace: "trace-1".to_string(),
                timestamp: Some(Utc::now()),
                caller: "src/sched.rs:42".to_string(),
                subject: "server".to_string(),
            },
            Level::Warn,
        );

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["level"], "warn");
        assert_eq!(json["subject"], "server");
    }
}
