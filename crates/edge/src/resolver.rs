//! Host → published site resolution with a bounded-staleness cache.
//!
//! The cache is a performance aid only: entries expire after the configured
//! TTL and are never served past it. A publish or rollback may therefore take
//! up to one TTL to become visible at a given edge node.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::StatusCode;
use vows_core::error::CoreError;
use vows_core::record::ResolvedSite;
use vows_core::subdomain;

/// Default TTL for resolve cache entries.
pub const DEFAULT_RESOLVE_TTL: Duration = Duration::from_secs(30);

/// Default resolve cache capacity (number of subdomains).
pub const DEFAULT_RESOLVE_CAPACITY: u64 = 10_000;

// ---------------------------------------------------------------------------
// Lookup source
// ---------------------------------------------------------------------------

/// Authoritative publish state for a subdomain.
#[async_trait]
pub trait ResolveSource: Send + Sync {
    /// Unknown subdomains resolve to an unpublished site, not an error.
    async fn lookup(&self, subdomain: &str) -> Result<ResolvedSite, CoreError>;
}

/// Calls the API's `GET /resolve?subdomain=` endpoint.
pub struct HttpResolveSource {
    client: reqwest::Client,
    url: String,
}

impl HttpResolveSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Internal(format!("failed to build resolve client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ResolveSource for HttpResolveSource {
    async fn lookup(&self, subdomain: &str) -> Result<ResolvedSite, CoreError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("subdomain", subdomain)])
            .send()
            .await
            .map_err(|e| CoreError::Unavailable(format!("resolve request failed: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(ResolvedSite::unpublished(subdomain)),
            status if status.is_success() => response
                .json::<ResolvedSite>()
                .await
                .map_err(|e| CoreError::Unavailable(format!("malformed resolve response: {e}"))),
            status => Err(CoreError::Unavailable(format!(
                "resolve endpoint returned HTTP {status}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolve cache parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    pub capacity: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_RESOLVE_TTL,
            capacity: DEFAULT_RESOLVE_CAPACITY,
        }
    }
}

/// Maps `Host` headers to publish state through a TTL cache.
///
/// Concurrent misses for one subdomain share a single lookup. Failed lookups
/// are not cached; unpublished answers are.
pub struct Resolver {
    base_domain: String,
    source: Arc<dyn ResolveSource>,
    cache: Cache<String, ResolvedSite>,
    timeout: Duration,
}

impl Resolver {
    pub fn new(
        base_domain: impl Into<String>,
        source: Arc<dyn ResolveSource>,
        policy: CachePolicy,
        timeout: Duration,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(policy.capacity)
            .time_to_live(policy.ttl)
            .build();
        Self {
            base_domain: base_domain.into(),
            source,
            cache,
            timeout,
        }
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Resolve a `Host` header.
    ///
    /// `Ok(None)` means the host is outside our namespace. A timed out or
    /// failed lookup is [`CoreError::Unavailable`].
    pub async fn resolve(&self, host: &str) -> Result<Option<ResolvedSite>, CoreError> {
        let Some(subdomain) = subdomain::extract_from_host(host, &self.base_domain) else {
            return Ok(None);
        };

        let source = Arc::clone(&self.source);
        let key = subdomain.clone();
        let lookup = self
            .cache
            .try_get_with(subdomain.clone(), async move { source.lookup(&key).await });

        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(site)) => Ok(Some(site)),
            Ok(Err(e)) => {
                tracing::warn!(subdomain = %subdomain, error = %e, "Resolve lookup failed");
                Err(CoreError::Unavailable(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(
                    subdomain = %subdomain,
                    timeout = ?self.timeout,
                    "Resolve lookup timed out",
                );
                Err(CoreError::Unavailable(format!(
                    "resolve for {subdomain} timed out"
                )))
            }
        }
    }

    /// Drop a cached entry so the next request looks it up again.
    pub async fn invalidate(&self, subdomain: &str) {
        self.cache.invalidate(subdomain).await;
    }

    /// Approximate number of cached subdomains.
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }
}
