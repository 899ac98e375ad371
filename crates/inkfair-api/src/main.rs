//! Inkfair marketplace API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use inkfair_catalog::domain::events::PRODUCT_CREATED_EVENT;
use inkfair_catalog::domain::repository::ProductRepository;
use inkfair_core::clock::{Clock, SystemClock};
use inkfair_designs::domain::events::DESIGN_CREATED_EVENT;
use inkfair_designs::domain::repository::DesignRepository;
use inkfair_events::{
    DeferredDispatcher, DeliveryMode, EventBus, EventLog, HandlerRegistry, InProcessQueue,
};
use inkfair_shops::application::event_handlers::ShowcaseNewestProduct;
use inkfair_shops::domain::events::SHOP_CREATED_EVENT;
use inkfair_shops::domain::repository::ShopRepository;
use inkfair_store::{PgDesignRepository, PgProductRepository, PgShopRepository};

use inkfair_api::error::AppError;
use inkfair_api::{routes, state};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Inkfair marketplace API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

    // Create database connection pool and apply the schema.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    inkfair_store::schema::ensure_schema(&pool).await?;

    // Build repositories.
    let shops: Arc<dyn ShopRepository> = Arc::new(PgShopRepository::new(pool.clone()));
    let designs: Arc<dyn DesignRepository> = Arc::new(PgDesignRepository::new(pool.clone()));
    let products: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(pool));

    // Bind event handlers. Registration is a one-time, order-preserving
    // setup step; the registry is frozen before the first publish.
    let registry = Arc::new(
        HandlerRegistry::builder()
            .subscribe(SHOP_CREATED_EVENT, Arc::new(EventLog), DeliveryMode::Sync)
            .subscribe(DESIGN_CREATED_EVENT, Arc::new(EventLog), DeliveryMode::Sync)
            .subscribe(PRODUCT_CREATED_EVENT, Arc::new(EventLog), DeliveryMode::Sync)
            .subscribe(
                PRODUCT_CREATED_EVENT,
                Arc::new(ShowcaseNewestProduct::new(shops.clone())),
                DeliveryMode::Deferred,
            )
            .build(),
    );

    // Deferred deliveries drain through the in-process queue worker. A
    // production deployment would swap in a durable broker adapter here.
    let dispatcher = DeferredDispatcher::new(registry.clone());
    let (queue, _worker) = InProcessQueue::start(dispatcher);
    let bus = Arc::new(EventBus::new(registry, Arc::new(queue)));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Build application state.
    let app_state = state::AppState::new(shops, designs, products, bus, clock);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/shops", routes::shops::router())
        .nest("/api/v1/designs", routes::designs::router())
        .nest("/api/v1/products", routes::products::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
