//! Event creation pipeline: enrich, redact, validate.

use std::future::Future;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use logpipe_event::{Context, EventCandidate, LogEvent, RedactionPolicy, ValidationError, Validator};

use crate::{CallerLocator, Enricher, IdentityLookup, SourcePathLocator, TraceContext};

/// Creates validated, immutable [`LogEvent`]s.
///
/// All collaborators are constructor-injected. Creation is asynchronous
/// and suspends only at the identity-lookup boundary; concurrent `create`
/// calls are independent and may interleave freely.
pub struct EventFactory {
    enricher: Enricher,
    redaction: RedactionPolicy,
    validator: Validator,
    locator: Arc<dyn CallerLocator>,
}

impl EventFactory {
    /// Factory with the default redaction policy, the full level set, and
    /// unstripped caller paths.
    pub fn new(lookup: Arc<dyn IdentityLookup>, trace: Arc<dyn TraceContext>) -> Self {
        Self {
            enricher: Enricher::new(lookup, trace),
            redaction: RedactionPolicy::default(),
            validator: Validator::new(),
            locator: Arc::new(SourcePathLocator::default()),
        }
    }

    pub fn with_redaction(mut self, redaction: RedactionPolicy) -> Self {
        self.redaction = redaction;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_locator(mut self, locator: Arc<dyn CallerLocator>) -> Self {
        self.locator = locator;
        self
    }

    /// Overrides the identity-lookup deadline.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.enricher = self.enricher.with_lookup_timeout(timeout);
        self
    }

    /// Runs the full pipeline: resolve subject and merge trace context,
    /// redact, validate. Returns the immutable event or the complete set
    /// of validation failures.
    ///
    /// The caller descriptor is captured here via `#[track_caller]`, so
    /// the rendered location points at the call site of `create`, not at
    /// pipeline internals.
    #[track_caller]
    pub fn create(
        &self,
        module: impl Into<String>,
        level: impl Into<String>,
        message: impl Into<String>,
        context: Context,
    ) -> impl Future<Output = Result<LogEvent, ValidationError>> + Send + '_ {
        let location = Location::caller();
        let caller = self.locator.format(location.file(), location.line());
        let module = module.into();
        let level = level.into();
        let message = message.into();

        async move {
            let trace = self.enricher.active_trace_id();
            let (merged, subject) = self.enricher.enrich(&context).await;
            let redacted = self.redaction.redact(&merged);

            self.validator.validate(EventCandidate {
                module,
                level,
                message,
                context: redacted,
                trace,
                timestamp: Some(Utc::now()),
                caller,
                subject,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedCaller, StaticLookup, StaticTrace, FALLBACK_SUBJECT};

    fn factory() -> EventFactory {
        EventFactory::new(
            Arc::new(StaticLookup::new().with_ip("10.0.0.5", "node-42")),
            Arc::new(StaticTrace::new("trace-abc123")),
        )
        .with_locator(Arc::new(FixedCaller("src/sched.rs:42".to_string())))
    }

    #[tokio::test]
    async fn test_create_with_empty_context() {
        let event = factory()
            .create("scheduler", "info", "job started", Context::new())
            .await
            .unwrap();

        assert_eq!(event.subject(), FALLBACK_SUBJECT);
        assert_eq!(event.trace(), "trace-abc123");
        assert!(event.context().is_empty());
    }

    #[tokio::test]
    async fn test_create_resolves_subject_from_ip() {
        let mut context = Context::new();
        context.insert("ip".to_string(), serde_json::json!("10.0.0.5"));

        let event = factory()
            .create("scheduler", "error", "disk full", context)
            .await
            .unwrap();

        assert_eq!(event.subject(), "node-42");
        assert_eq!(event.context()["ip"], "10.0.0.5");
    }

    #[tokio::test]
    async fn test_create_redacts_sensitive_keys() {
        let mut context = Context::new();
        context.insert("password".to_string(), serde_json::json!("hunter2"));
        context.insert("job".to_string(), serde_json::json!("reboot"));

        let event = factory()
            .create("auth", "warn", "login failed", context)
            .await
            .unwrap();

        assert!(!event.context().contains_key("password"));
        assert_eq!(event.context()["job"], "reboot");
    }

    #[tokio::test]
    async fn test_create_surfaces_validation_failures() {
        let err = factory()
            .create("", "loud", "", Context::new())
            .await
            .unwrap_err();

        assert!(err.names("module"));
        assert!(err.names("level"));
        assert!(err.names("message"));
    }

    #[tokio::test]
    async fn test_caller_comes_from_locator() {
        let event = factory()
            .create("scheduler", "debug", "tick", Context::new())
            .await
            .unwrap();

        assert_eq!(event.caller(), "src/sched.rs:42");
    }

    #[tokio::test]
    async fn test_track_caller_points_at_call_site() {
        let factory = EventFactory::new(
            Arc::new(StaticLookup::new()),
            Arc::new(StaticTrace::new("trace-1")),
        );

        let event = factory
            .create("scheduler", "info", "tick", Context::new())
            .await
            .unwrap();

        assert!(event.caller().contains("factory.rs"), "caller was {}", event.caller());
    }
}
