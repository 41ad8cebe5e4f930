//! The site request handler.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{
    ALLOW, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, ETAG, HOST, IF_NONE_MATCH,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use vows_core::{mime, site_path};
use vows_storage::manifest::sha256_hex;
use vows_storage::StoreError;

use crate::headers::NO_STORE;
use crate::state::EdgeState;

/// Serve a file of the site the `Host` header resolves to.
///
/// - 404 for foreign hosts, unpublished sites, unsafe paths and missing files.
/// - 503 when the resolve lookup or the object fetch fails or times out.
/// - 304 when `If-None-Match` matches the object's ETag.
pub async fn serve_site(
    State(state): State<EdgeState>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return method_not_allowed();
    }

    let Some(host) = request_host(&headers, &uri) else {
        return not_found();
    };

    let site = match state.resolver.resolve(&host).await {
        Ok(Some(site)) if site.is_servable() => site,
        Ok(_) => return not_found(),
        Err(e) => {
            tracing::warn!(host = %host, error = %e, "Resolve failed");
            return unavailable();
        }
    };

    let Some(path) = site_path::normalize_path(uri.path()) else {
        return not_found();
    };

    let fetch = state
        .store
        .get_object(&site.subdomain, site.current_version, &path);
    let object = match tokio::time::timeout(state.config.store_timeout, fetch).await {
        Ok(Ok(object)) => object,
        Ok(Err(StoreError::NotFound(_))) => return not_found(),
        Ok(Err(e)) => {
            tracing::error!(
                subdomain = %site.subdomain,
                version = site.current_version,
                path = %path,
                error = %e,
                "Object fetch failed",
            );
            return unavailable();
        }
        Err(_) => {
            tracing::warn!(
                subdomain = %site.subdomain,
                version = site.current_version,
                path = %path,
                "Object fetch timed out",
            );
            return unavailable();
        }
    };

    let content_type = object
        .content_type
        .clone()
        .unwrap_or_else(|| mime::content_type_for(&path).to_string());
    let cache_control = state.config.cache_control.for_object(&path, &content_type);
    let etag = format!("\"{}\"", sha256_hex(&object.bytes));

    if etag_matches(&headers, &etag) {
        return (
            StatusCode::NOT_MODIFIED,
            [(ETAG, etag), (CACHE_CONTROL, cache_control)],
        )
            .into_response();
    }

    let length = object.bytes.len();
    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(object.bytes)
    };

    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type),
            (CACHE_CONTROL, cache_control),
            (ETAG, etag),
            (CONTENT_LENGTH, length.to_string()),
        ],
        body,
    )
        .into_response()
}

/// `Host` header, falling back to the request URI authority (HTTP/2).
fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
}

/// Whether any entity tag in `If-None-Match` matches (weak comparison).
fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
        })
}

fn not_found() -> Response {
    plain(StatusCode::NOT_FOUND, "Not Found")
}

fn unavailable() -> Response {
    plain(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
}

fn method_not_allowed() -> Response {
    let mut response = plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
    response
}

/// Generic text response; never includes internal detail.
fn plain(status: StatusCode, message: &'static str) -> Response {
    (
        status,
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (CACHE_CONTROL, NO_STORE),
        ],
        message,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etag_comparison_handles_lists_and_weak_tags() {
        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("\"a\", W/\"b\""));
        assert!(etag_matches(&headers, "\"b\""));
        assert!(etag_matches(&headers, "\"a\""));
        assert!(!etag_matches(&headers, "\"c\""));

        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("*"));
        assert!(etag_matches(&headers, "\"anything\""));
        assert!(!etag_matches(&HeaderMap::new(), "\"a\""));
    }

    #[test]
    fn host_falls_back_to_authority() {
        let uri: Uri = "http://john-wedding.vows.test/index.html".parse().unwrap();
        assert_eq!(
            request_host(&HeaderMap::new(), &uri).as_deref(),
            Some("john-wedding.vows.test")
        );

        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("ana.vows.test"));
        assert_eq!(request_host(&headers, &uri).as_deref(), Some("ana.vows.test"));
    }
}
