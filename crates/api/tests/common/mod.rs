#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use vows_api::config::ServerConfig;
use vows_api::router::build_app_router;
use vows_api::state::AppState;
use vows_publish::{
    InvitationSnapshot, MemoryInvitationSource, MemoryRecordStore, Publisher, PublisherConfig,
    RetryPolicy,
};
use vows_render::SiteRenderer;
use vows_storage::backend::MemoryObjectStore;
use vows_storage::VersionStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        base_domain: "vows.test".to_string(),
        site_scheme: "https".to_string(),
        max_bundle_bytes: vows_render::DEFAULT_MAX_BUNDLE_BYTES,
        read_retry_attempts: 1,
        resolve_max_age_secs: 30,
    }
}

/// A router plus handles on the in-memory stores behind it.
pub struct TestApp {
    pub router: Router,
    pub invitations: Arc<MemoryInvitationSource>,
    pub records: Arc<MemoryRecordStore>,
    pub objects: Arc<MemoryObjectStore>,
}

pub fn invitation(id: &str, layout_id: &str, partner: &str) -> InvitationSnapshot {
    InvitationSnapshot::new(
        id,
        layout_id,
        json!({
            "couple": { "partnerOne": partner, "partnerTwo": "Jane" },
            "weddingDate": "2026-09-12",
        }),
    )
}

/// Build the full application router with the production middleware stack
/// over in-memory stores, seeded with invitations `inv-1` and `inv-2`.
pub async fn build_test_app() -> TestApp {
    let config = test_config();

    let records = Arc::new(MemoryRecordStore::new());
    let invitations = Arc::new(MemoryInvitationSource::new());
    let objects = Arc::new(MemoryObjectStore::new());

    invitations.upsert(invitation("inv-1", "classic", "John")).await;
    invitations.upsert(invitation("inv-2", "garden", "Mary")).await;

    let publisher = Publisher::new(
        records.clone(),
        invitations.clone(),
        VersionStore::new(objects.clone()),
        Arc::new(SiteRenderer::default()),
        PublisherConfig {
            base_domain: config.base_domain.clone(),
            scheme: config.site_scheme.clone(),
            retry: RetryPolicy::new(config.read_retry_attempts, Duration::ZERO),
        },
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        publisher: Arc::new(publisher),
    };

    TestApp {
        router: build_app_router(state, &config),
        invitations,
        records,
        objects,
    }
}

/// Send a GET request.
pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
