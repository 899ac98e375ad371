//! Routes for the Shops bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};

use inkfair_core::id::DomainId;
use inkfair_core::page::Page;
use inkfair_shops::application::{command_handlers, query_handlers};
use inkfair_shops::domain::aggregates::{NewShop, Shop, ShopPatch};

use crate::error::ApiError;
use crate::routes::PageParams;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateShopRequest {
    /// Display name of the storefront.
    pub name: String,
    /// URL-safe unique handle.
    pub slug: String,
    /// Merchant contact address.
    pub contact_email: String,
}

/// Request body for PATCH /{id}.
#[derive(Debug, Deserialize)]
pub struct UpdateShopRequest {
    /// New display name.
    pub name: Option<String>,
    /// New contact address.
    pub contact_email: Option<String>,
}

/// POST /
#[instrument(skip(state, request), fields(slug = %request.slug))]
async fn create_shop(
    State(state): State<AppState>,
    Json(request): Json<CreateShopRequest>,
) -> Result<(StatusCode, Json<Shop>), ApiError> {
    info!("handling create_shop command");

    let fields = NewShop {
        name: request.name,
        slug: request.slug,
        contact_email: request.contact_email,
    };
    let shop = command_handlers::handle_create_shop(
        fields,
        state.shops.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(shop)))
}

/// GET /
async fn list_shops(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Shop>>, ApiError> {
    let page = query_handlers::list_shops(&params.to_request(), state.shops.as_ref()).await?;
    Ok(Json(page))
}

/// GET /{id}
async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Shop>, ApiError> {
    let id = DomainId::from(id);
    let shop = query_handlers::get_shop(&id, state.shops.as_ref())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "shop",
            id,
        })?;
    Ok(Json(shop))
}

/// PATCH /{id}
#[instrument(skip(state, request), fields(shop_id = %id))]
async fn update_shop(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateShopRequest>,
) -> Result<Json<Shop>, ApiError> {
    let id = DomainId::from(id);
    let patch = ShopPatch {
        name: request.name,
        contact_email: request.contact_email,
        showcase_product_id: None,
    };
    let shop = command_handlers::handle_update_shop(
        &id,
        patch,
        state.shops.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound {
        resource: "shop",
        id,
    })?;
    Ok(Json(shop))
}

/// DELETE /{id}
#[instrument(skip(state), fields(shop_id = %id))]
async fn delete_shop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = DomainId::from(id);
    let removed = command_handlers::handle_delete_shop(
        &id,
        state.shops.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound {
            resource: "shop",
            id,
        })
    }
}

/// Returns the router for the shops context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_shop).get(list_shops))
        .route("/{id}", get(get_shop).patch(update_shop).delete(delete_shop))
}
