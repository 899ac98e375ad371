//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use inkfair_api::routes;
use inkfair_api::state::AppState;
use inkfair_catalog::domain::events::PRODUCT_CREATED_EVENT;
use inkfair_core::clock::Clock;
use inkfair_events::{DeliveryMode, EventBus, HandlerRegistry};
use inkfair_shops::application::event_handlers::ShowcaseNewestProduct;
use inkfair_test_support::{
    FailingDesignRepository, FailingHandler, FailingProductRepository, FailingShopRepository,
    FixedClock, InMemoryDesignRepository, InMemoryProductRepository, InMemoryShopRepository,
    RecordingQueue,
};

/// In-memory application plus handles for seeding and assertions.
pub struct TestApp {
    /// The full router; clone it per request.
    pub router: Router,
    /// Shops repository backing the router.
    pub shops: Arc<InMemoryShopRepository>,
    /// Designs repository backing the router.
    pub designs: Arc<InMemoryDesignRepository>,
    /// Products repository backing the router.
    pub products: Arc<InMemoryProductRepository>,
    /// The queue capturing deferred envelopes.
    pub queue: Arc<RecordingQueue>,
}

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Uses the same route structure as `main.rs`.
fn router_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/shops", routes::shops::router())
        .nest("/api/v1/designs", routes::designs::router())
        .nest("/api/v1/products", routes::products::router())
        .with_state(state)
}

fn build_app(registry: HandlerRegistry) -> TestApp {
    let shops = Arc::new(InMemoryShopRepository::new());
    let designs = Arc::new(InMemoryDesignRepository::new());
    let products = Arc::new(InMemoryProductRepository::new());
    let queue = Arc::new(RecordingQueue::default());

    let bus = Arc::new(EventBus::new(Arc::new(registry), queue.clone()));
    let state = AppState::new(
        shops.clone(),
        designs.clone(),
        products.clone(),
        bus,
        fixed_clock(),
    );

    TestApp {
        router: router_with_state(state),
        shops,
        designs,
        products,
        queue,
    }
}

/// Build the full app over in-memory repositories, with the showcase
/// subscriber registered deferred — the same wiring as `main.rs`, minus
/// the worker (envelopes are captured, not executed).
pub fn build_test_app() -> TestApp {
    let shops = Arc::new(InMemoryShopRepository::new());
    let designs = Arc::new(InMemoryDesignRepository::new());
    let products = Arc::new(InMemoryProductRepository::new());
    let queue = Arc::new(RecordingQueue::default());

    let registry = HandlerRegistry::builder()
        .subscribe(
            PRODUCT_CREATED_EVENT,
            Arc::new(ShowcaseNewestProduct::new(shops.clone())),
            DeliveryMode::Deferred,
        )
        .build();
    let bus = Arc::new(EventBus::new(Arc::new(registry), queue.clone()));
    let state = AppState::new(
        shops.clone(),
        designs.clone(),
        products.clone(),
        bus,
        fixed_clock(),
    );

    TestApp {
        router: router_with_state(state),
        shops,
        designs,
        products,
        queue,
    }
}

/// Build an app whose `catalog.product_created` sync subscriber always
/// fails, for handler-failure propagation tests.
pub fn build_app_with_failing_sync_handler() -> TestApp {
    let registry = HandlerRegistry::builder()
        .subscribe(
            PRODUCT_CREATED_EVENT,
            Arc::new(FailingHandler::new("test.failing_sync")),
            DeliveryMode::Sync,
        )
        .subscribe(
            PRODUCT_CREATED_EVENT,
            Arc::new(FailingHandler::new("test.failing_deferred_marker")),
            DeliveryMode::Deferred,
        )
        .build();
    build_app(registry)
}

/// Build the full app over repositories that fail every call.
pub fn build_failing_app() -> Router {
    let registry = Arc::new(HandlerRegistry::builder().build());
    let bus = Arc::new(EventBus::new(registry, Arc::new(RecordingQueue::default())));
    let state = AppState::new(
        Arc::new(FailingShopRepository),
        Arc::new(FailingDesignRepository),
        Arc::new(FailingProductRepository),
        bus,
        fixed_clock(),
    );
    router_with_state(state)
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

/// Send a PATCH request with a JSON body and return the response.
pub async fn patch_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PATCH", uri, Some(body)).await
}

/// Send a DELETE request and return the response. The body is `Null` for
/// empty responses such as 204.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, None).await
}
