//! Edge serving behaviour end to end: publish, resolve, fetch, roll back.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_bytes, get, request, stylesheet_href};
use tower::ServiceExt;
use vows_core::error::CoreError;
use vows_core::record::ResolvedSite;
use vows_edge::resolver::{ResolveSource, Resolver, DEFAULT_RESOLVE_TTL};
use vows_edge::router::build_edge_router;
use vows_edge::state::EdgeState;
use vows_storage::backend::MemoryObjectStore;
use vows_storage::VersionStore;

const HOST: &str = "john-wedding.vows.test";

// ---------------------------------------------------------------------------
// Serving published content
// ---------------------------------------------------------------------------

#[tokio::test]
async fn serves_current_version_with_headers() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();

    let response = get(&edge.router, HOST, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers["content-type"], "text/html; charset=utf-8");
    assert_eq!(
        headers["cache-control"],
        "public, max-age=60, stale-while-revalidate=300"
    );
    assert!(headers["etag"].to_str().unwrap().starts_with('"'));
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
    assert!(headers.contains_key("content-security-policy"));

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("John"));
}

#[tokio::test]
async fn linked_stylesheet_gets_immutable_cache_control() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();

    let href = stylesheet_href(&body_bytes(get(&edge.router, HOST, "/").await).await);
    let response = get(&edge.router, HOST, &href).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/css; charset=utf-8");
    assert_eq!(
        response.headers()["cache-control"],
        "public, max-age=31536000, immutable"
    );
}

#[tokio::test]
async fn theme_change_links_a_new_stylesheet_and_rollback_restores_the_old_one() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;

    let mut dark = common::invitation("inv-1", "John");
    dark.layout_config = json!({ "theme": { "colors": { "primary": "#111111" } } });
    edge.invitations.upsert(dark).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();
    let v1_href = stylesheet_href(&body_bytes(get(&edge.router, HOST, "/").await).await);

    let mut light = common::invitation("inv-1", "John");
    light.layout_config = json!({ "theme": { "colors": { "primary": "#222222" } } });
    edge.invitations.upsert(light).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();
    edge.resolver.invalidate("john-wedding").await;
    let v2_href = stylesheet_href(&body_bytes(get(&edge.router, HOST, "/").await).await);

    // A cached copy of one version's stylesheet can never stand in for another's.
    assert_ne!(v1_href, v2_href);
    let css = body_bytes(get(&edge.router, HOST, &v2_href).await).await;
    assert!(String::from_utf8(css).unwrap().contains("#222222"));
    assert_eq!(
        get(&edge.router, HOST, &v1_href).await.status(),
        StatusCode::NOT_FOUND
    );

    edge.publisher.rollback("john-wedding", 1).await.unwrap();
    edge.resolver.invalidate("john-wedding").await;
    let restored = stylesheet_href(&body_bytes(get(&edge.router, HOST, "/").await).await);
    assert_eq!(restored, v1_href);
    assert_eq!(get(&edge.router, HOST, &v1_href).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn unfingerprinted_path_is_not_cached_as_immutable() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();

    // The previous unversioned stylesheet URL no longer exists.
    let response = get(&edge.router, HOST, "/assets/site.css").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["cache-control"], "no-store");
}

#[tokio::test]
async fn rollback_serves_original_bytes() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;

    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();
    let v1 = body_bytes(get(&edge.router, HOST, "/").await).await;

    edge.invitations
        .upsert(common::invitation("inv-1", "Johnny"))
        .await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();
    edge.resolver.invalidate("john-wedding").await;
    let v2 = body_bytes(get(&edge.router, HOST, "/index.html").await).await;
    assert_ne!(v1, v2);

    edge.publisher.rollback("john-wedding", 1).await.unwrap();
    edge.resolver.invalidate("john-wedding").await;
    let after = body_bytes(get(&edge.router, HOST, "/").await).await;
    assert_eq!(after, v1);
}

#[tokio::test]
async fn matching_etag_returns_304() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();

    let first = get(&edge.router, HOST, "/").await;
    let etag = first.headers()["etag"].clone();

    let request = Request::builder()
        .uri("/")
        .header("host", HOST)
        .header("if-none-match", etag.clone())
        .body(Body::empty())
        .unwrap();
    let response = edge.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(response.headers()["etag"], etag);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn head_has_headers_but_no_body() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();

    let response = request(&edge.router, Method::HEAD, HOST, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("etag"));
    assert_ne!(response.headers()["content-length"], "0");
    assert!(body_bytes(response).await.is_empty());
}

// ---------------------------------------------------------------------------
// Negative cases
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_or_unpublished_hosts_are_404() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;

    let foreign = get(&edge.router, "example.com", "/").await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

    let unknown = get(&edge.router, "nobody-here.vows.test", "/").await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(unknown.headers()["cache-control"], "no-store");
    assert_eq!(unknown.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn missing_and_private_paths_are_404() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();

    for path in ["/nope.html", "/.manifest.json", "/../v1/index.html", "/assets/"] {
        let response = get(&edge.router, HOST, path).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {path}");
    }
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();

    let response = request(&edge.router, Method::POST, HOST, "/").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["allow"], "GET, HEAD");
}

/// Resolve source whose backing API is down.
struct DownSource;

#[async_trait]
impl ResolveSource for DownSource {
    async fn lookup(&self, _subdomain: &str) -> Result<ResolvedSite, CoreError> {
        Err(CoreError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn resolve_outage_is_503_without_detail() {
    let config = common::test_config(DEFAULT_RESOLVE_TTL);
    let resolver = Resolver::new(
        common::BASE_DOMAIN,
        Arc::new(DownSource),
        config.resolve_cache,
        config.resolve_timeout,
    );
    let router = build_edge_router(EdgeState {
        config: Arc::new(config),
        resolver: Arc::new(resolver),
        store: VersionStore::new(Arc::new(MemoryObjectStore::new())),
    });

    let response = get(&router, HOST, "/").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.headers()["cache-control"], "no-store");
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(body, "Service Unavailable");
}

// ---------------------------------------------------------------------------
// Resolve cache staleness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cached_resolution_is_bounded_by_ttl() {
    let edge = common::build_test_edge(Duration::from_secs(1)).await;

    // Cache the unpublished answer.
    assert_eq!(get(&edge.router, HOST, "/").await.status(), StatusCode::NOT_FOUND);
    edge.publisher.publish("inv-1", "john-wedding").await.unwrap();

    // Within the TTL the cached negative answer is still served.
    assert_eq!(get(&edge.router, HOST, "/").await.status(), StatusCode::NOT_FOUND);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(get(&edge.router, HOST, "/").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_probe_is_served_on_any_host() {
    let edge = common::build_test_edge(DEFAULT_RESOLVE_TTL).await;

    let response = get(&edge.router, "anything.example", "/.edge/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storeBackend"], "memory");
}
