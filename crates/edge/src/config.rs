use std::time::Duration;

use crate::headers::CacheControlPolicy;
use crate::resolver::CachePolicy;

/// Edge server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EdgeConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8787`).
    pub port: u16,
    /// Domain published sites hang off (default: `vows.local`).
    pub base_domain: String,
    /// Resolve API endpoint (default: `http://localhost:3000/api/v1/resolve`).
    pub resolve_url: String,
    /// Resolve cache TTL and capacity.
    pub resolve_cache: CachePolicy,
    /// Upper bound on one resolve lookup, cache miss included.
    pub resolve_timeout: Duration,
    /// Upper bound on one object fetch.
    pub store_timeout: Duration,
    /// Cache-Control values for served files.
    pub cache_control: CacheControlPolicy,
}

impl EdgeConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                                |
    /// |--------------------------|----------------------------------------|
    /// | `EDGE_HOST`              | `0.0.0.0`                              |
    /// | `EDGE_PORT`              | `8787`                                 |
    /// | `BASE_DOMAIN`            | `vows.local`                           |
    /// | `RESOLVE_URL`            | `http://localhost:3000/api/v1/resolve` |
    /// | `RESOLVE_CACHE_TTL_SECS` | `30`                                   |
    /// | `RESOLVE_CACHE_CAPACITY` | `10000`                                |
    /// | `RESOLVE_TIMEOUT_MS`     | `2000`                                 |
    /// | `STORE_TIMEOUT_MS`       | `3000`                                 |
    /// | `HTML_MAX_AGE_SECS`      | `60`                                   |
    /// | `HTML_SWR_SECS`          | `300`                                  |
    pub fn from_env() -> Self {
        let host = std::env::var("EDGE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_parse("EDGE_PORT", 8787);

        let base_domain = std::env::var("BASE_DOMAIN")
            .unwrap_or_else(|_| "vows.local".into())
            .trim()
            .trim_end_matches('.')
            .to_ascii_lowercase();

        let resolve_url = std::env::var("RESOLVE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1/resolve".into());

        let resolve_cache = CachePolicy {
            ttl: Duration::from_secs(env_parse("RESOLVE_CACHE_TTL_SECS", 30)),
            capacity: env_parse("RESOLVE_CACHE_CAPACITY", 10_000),
        };

        let resolve_timeout = Duration::from_millis(env_parse("RESOLVE_TIMEOUT_MS", 2_000));
        let store_timeout = Duration::from_millis(env_parse("STORE_TIMEOUT_MS", 3_000));

        let cache_control = CacheControlPolicy {
            html_max_age_secs: env_parse("HTML_MAX_AGE_SECS", 60),
            html_stale_while_revalidate_secs: env_parse("HTML_SWR_SECS", 300),
        };

        Self {
            host,
            port,
            base_domain,
            resolve_url,
            resolve_cache,
            resolve_timeout,
            store_timeout,
            cache_control,
        }
    }
}

/// Parse an optional env var, panicking on malformed values.
fn env_parse<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be valid: {e}")),
        Err(_) => default,
    }
}
