//! Routes for the Catalog bounded context.
//!
//! The listing endpoint returns hydrated views: relations resolved in a
//! bounded number of queries, dangling references marked unresolved.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};

use inkfair_catalog::application::{command_handlers, query_handlers};
use inkfair_catalog::domain::aggregates::{NewProduct, Product, ProductPatch};
use inkfair_core::id::DomainId;
use inkfair_core::page::Page;

use crate::error::ApiError;
use crate::routes::PageParams;
use crate::state::AppState;
use crate::views::products::{ProductView, hydrate_product_page};

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Owning shop reference.
    pub shop_id: DomainId,
    /// Printed design reference, if any.
    pub design_id: Option<DomainId>,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: Option<String>,
    /// Price in minor units.
    pub price_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Request body for PATCH /{id}.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// New listing title.
    pub title: Option<String>,
    /// New listing description.
    pub description: Option<String>,
    /// New price in minor units.
    pub price_cents: Option<i64>,
}

/// POST /
#[instrument(skip(state, request), fields(shop_id = %request.shop_id))]
async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    info!("handling create_product command");

    let fields = NewProduct {
        shop_id: request.shop_id,
        design_id: request.design_id,
        title: request.title,
        description: request.description,
        price_cents: request.price_cents,
        currency: request.currency,
    };
    let product = command_handlers::handle_create_product(
        fields,
        state.products.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET / — one page query, one count query, plus at most one batch query
/// per referenced type present on the page.
async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<ProductView>>, ApiError> {
    let page =
        query_handlers::list_products(&params.to_request(), state.products.as_ref()).await?;
    let view =
        hydrate_product_page(page, state.shops.as_ref(), state.designs.as_ref()).await?;
    Ok(Json(view))
}

/// GET /{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = DomainId::from(id);
    let product = query_handlers::get_product(&id, state.products.as_ref())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "product",
            id,
        })?;
    Ok(Json(product))
}

/// PATCH /{id}
#[instrument(skip(state, request), fields(product_id = %id))]
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let id = DomainId::from(id);
    let patch = ProductPatch {
        title: request.title,
        description: request.description,
        price_cents: request.price_cents,
    };
    let product = command_handlers::handle_update_product(
        &id,
        patch,
        state.products.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound {
        resource: "product",
        id,
    })?;
    Ok(Json(product))
}

/// DELETE /{id}
#[instrument(skip(state), fields(product_id = %id))]
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = DomainId::from(id);
    let removed = command_handlers::handle_delete_product(
        &id,
        state.products.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound {
            resource: "product",
            id,
        })
    }
}

/// Returns the router for the catalog context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}
