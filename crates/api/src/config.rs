/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Domain published sites hang off (default: `vows.local`).
    pub base_domain: String,
    /// Scheme used when building site URLs (default: `https`).
    pub site_scheme: String,
    /// Ceiling for one rendered bundle in bytes (default: 5 MiB).
    pub max_bundle_bytes: usize,
    /// Attempts for idempotent record reads, including the first (default: `3`).
    pub read_retry_attempts: u32,
    /// `max-age` advertised on resolve responses (default: `30`).
    pub resolve_max_age_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `BASE_DOMAIN`           | `vows.local`            |
    /// | `SITE_SCHEME`           | `https`                 |
    /// | `MAX_BUNDLE_BYTES`      | `5242880`               |
    /// | `READ_RETRY_ATTEMPTS`   | `3`                     |
    /// | `RESOLVE_MAX_AGE_SECS`  | `30`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let base_domain = std::env::var("BASE_DOMAIN")
            .unwrap_or_else(|_| "vows.local".into())
            .trim()
            .trim_end_matches('.')
            .to_ascii_lowercase();

        let site_scheme = std::env::var("SITE_SCHEME").unwrap_or_else(|_| "https".into());

        let max_bundle_bytes: usize = std::env::var("MAX_BUNDLE_BYTES")
            .unwrap_or_else(|_| vows_render::DEFAULT_MAX_BUNDLE_BYTES.to_string())
            .parse()
            .expect("MAX_BUNDLE_BYTES must be a valid usize");

        let read_retry_attempts: u32 = std::env::var("READ_RETRY_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("READ_RETRY_ATTEMPTS must be a valid u32");

        let resolve_max_age_secs: u64 = std::env::var("RESOLVE_MAX_AGE_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("RESOLVE_MAX_AGE_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            base_domain,
            site_scheme,
            max_bundle_bytes,
            read_retry_attempts,
            resolve_max_age_secs,
        }
    }
}
