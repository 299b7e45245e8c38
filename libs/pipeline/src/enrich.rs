//! Context enrichment: trace snapshot merge and subject resolution.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use logpipe_event::Context;

use crate::{IdentityLookup, LookupError, TraceContext};

/// Subject used when resolution does not apply or fails.
pub const FALLBACK_SUBJECT: &str = "server";

/// Context key carrying an explicit subject identifier.
const ID_KEY: &str = "id";

/// Context key carrying a hardware address.
const MAC_KEY: &str = "macaddress";

/// Context key carrying an IP address.
const IP_KEY: &str = "ip";

/// Default deadline for a single identity lookup.
pub(crate) const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Merges ambient trace context into event context and resolves the event
/// subject through the identity-lookup capability.
///
/// Enrichment is infallible by contract: every lookup error, timeout, or
/// cancellation degrades to [`FALLBACK_SUBJECT`]. The worst-case behavior
/// is a log line attributed to `"server"` instead of a specific node.
pub struct Enricher {
    lookup: Arc<dyn IdentityLookup>,
    trace: Arc<dyn TraceContext>,
    lookup_timeout: Duration,
}

impl Enricher {
    pub fn new(lookup: Arc<dyn IdentityLookup>, trace: Arc<dyn TraceContext>) -> Self {
        Self {
            lookup,
            trace,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Overrides the per-lookup deadline.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Identifier of the active trace, independent of context enrichment.
    pub fn active_trace_id(&self) -> String {
        self.trace.active_id()
    }

    /// Returns the merged context and the resolved subject.
    ///
    /// The merged context is the caller's context plus a cloned snapshot of
    /// the active trace fields, so each event owns an independent copy.
    pub async fn enrich(&self, context: &Context) -> (Context, String) {
        let subject = self.resolve_subject(context).await;

        let mut merged = context.clone();
        for (key, value) in self.trace.active_snapshot() {
            merged.insert(key, value);
        }

        (merged, subject)
    }

    /// Resolution order, first hit wins: empty context → fallback;
    /// explicit non-empty id → verbatim; hardware address → lookup; IP
    /// address → lookup; anything else (including lookup failure or an
    /// empty lookup result) → fallback. The result is never empty.
    async fn resolve_subject(&self, context: &Context) -> String {
        if context.is_empty() {
            return FALLBACK_SUBJECT.to_string();
        }

        if let Some(id) = context.get(ID_KEY).and_then(|v| v.as_str()) {
            if !id.is_empty() {
                return id.to_string();
            }
        }

        let attempt = if let Some(mac) = context.get(MAC_KEY).and_then(|v| v.as_str()) {
            Some(self.bounded(self.lookup.node_by_mac(mac)).await)
        } else if let Some(ip) = context.get(IP_KEY).and_then(|v| v.as_str()) {
            Some(self.bounded(self.lookup.node_by_ip(ip)).await)
        } else {
            None
        };

        match attempt {
            Some(Ok(subject)) if !subject.is_empty() => subject,
            Some(Ok(_)) => FALLBACK_SUBJECT.to_string(),
            Some(Err(err)) => {
                // Absorbed by contract; logged so outages stay observable.
                debug!(error = %err, "identity lookup absorbed, using fallback subject");
                FALLBACK_SUBJECT.to_string()
            }
            None => FALLBACK_SUBJECT.to_string(),
        }
    }

    async fn bounded<F>(&self, lookup: F) -> Result<String, LookupError>
    where
        F: std::future::Future<Output = Result<String, LookupError>>,
    {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StaticLookup, StaticTrace};

    fn enricher(lookup: StaticLookup) -> (Enricher, Arc<StaticLookup>) {
        let lookup = Arc::new(lookup);
        let trace = Arc::new(StaticTrace::new("trace-1"));
        (Enricher::new(lookup.clone(), trace), lookup)
    }

    fn context_from(pairs: &[(&str, &str)]) -> Context {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::json!(v)))
            .collect()
    }

    #[tokio::test]
    async fn test_empty_context_skips_lookup() {
        let (enricher, lookup) = enricher(StaticLookup::new().with_ip("10.0.0.5", "node-42"));

        let (_, subject) = enricher.enrich(&Context::new()).await;

        assert_eq!(subject, FALLBACK_SUBJECT);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_explicit_id_used_verbatim() {
        let (enricher, lookup) = enricher(StaticLookup::new());

        let context = context_from(&[("id", "node-9"), ("ip", "10.0.0.5")]);
        let (_, subject) = enricher.enrich(&context).await;

        assert_eq!(subject, "node-9");
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_id_value_falls_through_to_lookup() {
        let (enricher, _) = enricher(StaticLookup::new().with_ip("10.0.0.5", "node-42"));

        let context = context_from(&[("id", ""), ("ip", "10.0.0.5")]);
        let (_, subject) = enricher.enrich(&context).await;

        assert_eq!(subject, "node-42");
    }

    #[tokio::test]
    async fn test_empty_id_without_addresses_falls_back() {
        let (enricher, lookup) = enricher(StaticLookup::new());

        let (_, subject) = enricher.enrich(&context_from(&[("id", "")])).await;

        assert_eq!(subject, FALLBACK_SUBJECT);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_lookup_result_falls_back() {
        let (enricher, _) = enricher(StaticLookup::new().with_ip("10.0.0.5", ""));

        let (_, subject) = enricher.enrich(&context_from(&[("ip", "10.0.0.5")])).await;

        assert_eq!(subject, FALLBACK_SUBJECT);
    }

    #[tokio::test]
    async fn test_mac_takes_priority_over_ip() {
        let (enricher, _) = enricher(
            StaticLookup::new()
                .with_mac("aa:bb:cc:dd:ee:ff", "node-mac")
                .with_ip("10.0.0.5", "node-ip"),
        );

        let context = context_from(&[("macaddress", "aa:bb:cc:dd:ee:ff"), ("ip", "10.0.0.5")]);
        let (_, subject) = enricher.enrich(&context).await;

        assert_eq!(subject, "node-mac");
    }

    #[tokio::test]
    async fn test_ip_resolves_when_no_mac() {
        let (enricher, _) = enricher(StaticLookup::new().with_ip("10.0.0.5", "node-42"));

        let (_, subject) = enricher.enrich(&context_from(&[("ip", "10.0.0.5")])).await;

        assert_eq!(subject, "node-42");
    }

    #[tokio::test]
    async fn test_lookup_failure_falls_back() {
        let (enricher, _) = enricher(StaticLookup::failing());

        let (_, subject) = enricher.enrich(&context_from(&[("ip", "10.0.0.5")])).await;

        assert_eq!(subject, FALLBACK_SUBJECT);
    }

    #[tokio::test]
    async fn test_unresolved_address_falls_back() {
        let (enricher, _) = enricher(StaticLookup::new());

        let (_, subject) = enricher
            .enrich(&context_from(&[("macaddress", "00:00:00:00:00:00")]))
            .await;

        assert_eq!(subject, FALLBACK_SUBJECT);
    }

    #[tokio::test]
    async fn test_slow_lookup_hits_deadline_and_falls_back() {
        let lookup = StaticLookup::new()
            .with_ip("10.0.0.5", "node-42")
            .with_delay(Duration::from_millis(200));
        let trace = Arc::new(StaticTrace::new("trace-1"));
        let enricher = Enricher::new(Arc::new(lookup), trace)
            .with_lookup_timeout(Duration::from_millis(10));

        let (_, subject) = enricher.enrich(&context_from(&[("ip", "10.0.0.5")])).await;

        assert_eq!(subject, FALLBACK_SUBJECT);
    }

    #[tokio::test]
    async fn test_unrelated_context_falls_back_without_lookup() {
        let (enricher, lookup) = enricher(StaticLookup::new().with_ip("10.0.0.5", "node-42"));

        let (_, subject) = enricher.enrich(&context_from(&[("job", "reboot")])).await;

        assert_eq!(subject, FALLBACK_SUBJECT);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_merges_trace_snapshot() {
        let lookup = Arc::new(StaticLookup::new());
        let trace =
            Arc::new(StaticTrace::new("trace-1").with_field("request", serde_json::json!("r-9")));
        let enricher = Enricher::new(lookup, trace);

        let (merged, _) = enricher.enrich(&context_from(&[("job", "reboot")])).await;

        assert_eq!(merged["job"], "reboot");
        assert_eq!(merged["request"], "r-9");
    }

    #[tokio::test]
    async fn test_source_context_unchanged_by_merge() {
        let lookup = Arc::new(StaticLookup::new());
        let trace =
            Arc::new(StaticTrace::new("trace-1").with_field("request", serde_json::json!("r-9")));
        let enricher = Enricher::new(lookup, trace);

        let context = context_from(&[("job", "reboot")]);
        let _ = enricher.enrich(&context).await;

        assert!(!context.contains_key("request"));
    }
}
