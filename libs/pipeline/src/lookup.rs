//! Identity-lookup capability: hardware/IP address to node identity.
//!
//! The production implementation is expected to be network-backed; the
//! enricher always calls it under a deadline. A static table
//! implementation is provided for tests and offline use.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::LookupError;

/// Resolves node identities from addresses carried in event context.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Resolve a hardware (MAC) address to a node identity.
    async fn node_by_mac(&self, mac: &str) -> Result<String, LookupError>;

    /// Resolve an IP address to a node identity.
    async fn node_by_ip(&self, ip: &str) -> Result<String, LookupError>;
}

/// In-memory lookup table, for tests and offline use.
pub struct StaticLookup {
    by_mac: HashMap<String, String>,
    by_ip: HashMap<String, String>,
    delay: Option<Duration>,
    fail: bool,
    calls: AtomicUsize,
}

impl StaticLookup {
    /// Empty table; every resolution returns [`LookupError::Unresolved`].
    pub fn new() -> Self {
        Self {
            by_mac: HashMap::new(),
            by_ip: HashMap::new(),
            delay: None,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Lookup that fails every call.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Adds a MAC address mapping.
    pub fn with_mac(mut self, mac: impl Into<String>, node: impl Into<String>) -> Self {
        self.by_mac.insert(mac.into(), node.into());
        self
    }

    /// Adds an IP address mapping.
    pub fn with_ip(mut self, ip: impl Into<String>, node: impl Into<String>) -> Self {
        self.by_ip.insert(ip.into(), node.into());
        self
    }

    /// Delays every resolution, for exercising the enricher deadline.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of resolutions attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn resolve(
        &self,
        table: &HashMap<String, String>,
        key: &str,
    ) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(LookupError::Backend("static lookup configured to fail".to_string()));
        }

        table
            .get(key)
            .cloned()
            .ok_or_else(|| LookupError::Unresolved(key.to_string()))
    }
}

impl Default for StaticLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityLookup for StaticLookup {
    async fn node_by_mac(&self, mac: &str) -> Result<String, LookupError> {
        self.resolve(&self.by_mac, mac).await
    }

    async fn node_by_ip(&self, ip: &str) -> Result<String, LookupError> {
        self.resolve(&self.by_ip, ip).await
    }
}
