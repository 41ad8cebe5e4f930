//! Response header policy for served sites.

use axum::http::header::{
    CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
};
use axum::http::{HeaderName, HeaderValue};
use vows_core::{mime, site_path};

/// Policy for rendered invitation sites: no scripts, no framing, images
/// from any https origin.
pub const SITE_CSP: &str = "default-src 'self'; img-src 'self' https: data:; \
     style-src 'self'; font-src 'self' https: data:; script-src 'none'; \
     object-src 'none'; base-uri 'none'; form-action 'none'; frame-ancestors 'none'";

/// Fingerprinted assets never change under their URL.
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Error and miss responses must not be cached as content.
pub const NO_STORE: &str = "no-store";

/// Security headers applied to every edge response, regardless of layout.
pub fn security_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        (
            REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ),
        (CONTENT_SECURITY_POLICY, HeaderValue::from_static(SITE_CSP)),
    ]
}

/// `Cache-Control` selection for a served object.
///
/// Only content-fingerprinted files are cached for a year. Everything else,
/// HTML included, is served from a URL shared by every version, so it gets
/// the short window that lets republishes and rollbacks propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheControlPolicy {
    /// Applies to HTML and to any file without a content fingerprint.
    pub html_max_age_secs: u64,
    pub html_stale_while_revalidate_secs: u64,
}

impl Default for CacheControlPolicy {
    fn default() -> Self {
        Self {
            html_max_age_secs: 60,
            html_stale_while_revalidate_secs: 300,
        }
    }
}

impl CacheControlPolicy {
    pub fn for_object(&self, path: &str, content_type: &str) -> String {
        if !mime::is_html(content_type) && site_path::is_fingerprinted(path) {
            IMMUTABLE_CACHE_CONTROL.to_string()
        } else {
            format!(
                "public, max-age={}, stale-while-revalidate={}",
                self.html_max_age_secs, self.html_stale_while_revalidate_secs
            )
        }
    }
}
