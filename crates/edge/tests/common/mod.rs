#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use vows_core::error::CoreError;
use vows_core::record::ResolvedSite;
use vows_edge::config::EdgeConfig;
use vows_edge::headers::CacheControlPolicy;
use vows_edge::resolver::{CachePolicy, ResolveSource, Resolver};
use vows_edge::router::build_edge_router;
use vows_edge::state::EdgeState;
use vows_publish::{
    InvitationSnapshot, MemoryInvitationSource, MemoryRecordStore, Publisher, PublisherConfig,
};
use vows_render::SiteRenderer;
use vows_storage::backend::MemoryObjectStore;
use vows_storage::VersionStore;

pub const BASE_DOMAIN: &str = "vows.test";

/// Resolves straight against an in-process publisher instead of over HTTP.
pub struct PublisherSource(pub Arc<Publisher>);

#[async_trait]
impl ResolveSource for PublisherSource {
    async fn lookup(&self, subdomain: &str) -> Result<ResolvedSite, CoreError> {
        self.0.resolve(subdomain).await
    }
}

pub fn test_config(ttl: Duration) -> EdgeConfig {
    EdgeConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_domain: BASE_DOMAIN.to_string(),
        resolve_url: "http://unused.invalid/resolve".to_string(),
        resolve_cache: CachePolicy { ttl, capacity: 100 },
        resolve_timeout: Duration::from_secs(1),
        store_timeout: Duration::from_secs(1),
        cache_control: CacheControlPolicy::default(),
    }
}

pub struct TestEdge {
    pub router: Router,
    pub publisher: Arc<Publisher>,
    pub resolver: Arc<Resolver>,
    pub invitations: Arc<MemoryInvitationSource>,
}

pub fn invitation(id: &str, partner: &str) -> InvitationSnapshot {
    InvitationSnapshot::new(
        id,
        "classic",
        json!({ "couple": { "partnerOne": partner, "partnerTwo": "Jane" } }),
    )
}

/// Publisher and edge sharing one in-memory version store.
///
/// `ttl` is the resolve cache TTL. Tests that change the pointer after a
/// request either wait out the TTL or invalidate through `resolver`.
pub async fn build_test_edge(ttl: Duration) -> TestEdge {
    let invitations = Arc::new(MemoryInvitationSource::new());
    invitations.upsert(invitation("inv-1", "John")).await;

    let store = VersionStore::new(Arc::new(MemoryObjectStore::new()));
    let publisher = Arc::new(Publisher::new(
        Arc::new(MemoryRecordStore::new()),
        invitations.clone(),
        store.clone(),
        Arc::new(SiteRenderer::default()),
        PublisherConfig::new(BASE_DOMAIN),
    ));

    let config = test_config(ttl);
    let resolver = Resolver::new(
        BASE_DOMAIN,
        Arc::new(PublisherSource(publisher.clone())),
        config.resolve_cache,
        config.resolve_timeout,
    );

    let resolver = Arc::new(resolver);

    let state = EdgeState {
        config: Arc::new(config),
        resolver: resolver.clone(),
        store,
    };

    TestEdge {
        router: build_edge_router(state),
        publisher,
        resolver,
        invitations,
    }
}

/// Send a request for `path` with the given `Host`.
pub async fn request(app: &Router, method: Method, host: &str, path: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("host", host)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, host: &str, path: &str) -> Response {
    request(app, Method::GET, host, path).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Stylesheet URL linked from a served `index.html`.
pub fn stylesheet_href(html: &[u8]) -> String {
    const MARKER: &str = r#"rel="stylesheet" href=""#;
    let html = std::str::from_utf8(html).unwrap();
    let start = html.find(MARKER).unwrap() + MARKER.len();
    let end = start + html[start..].find('"').unwrap();
    html[start..end].to_string()
}
