//! Routes for the Designs bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};

use inkfair_core::id::DomainId;
use inkfair_core::page::Page;
use inkfair_designs::application::{command_handlers, query_handlers};
use inkfair_designs::domain::aggregates::{Design, DesignPatch, NewDesign};

use crate::error::ApiError;
use crate::routes::PageParams;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateDesignRequest {
    /// Artwork title.
    pub title: String,
    /// Rendered preview location, when already known.
    pub preview_url: Option<String>,
}

/// Request body for PATCH /{id}.
#[derive(Debug, Deserialize)]
pub struct UpdateDesignRequest {
    /// New artwork title.
    pub title: Option<String>,
    /// New preview location.
    pub preview_url: Option<String>,
}

/// POST /
#[instrument(skip(state, request))]
async fn create_design(
    State(state): State<AppState>,
    Json(request): Json<CreateDesignRequest>,
) -> Result<(StatusCode, Json<Design>), ApiError> {
    info!("handling create_design command");

    let fields = NewDesign {
        title: request.title,
        preview_url: request.preview_url,
    };
    let design = command_handlers::handle_create_design(
        fields,
        state.designs.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(design)))
}

/// GET /
async fn list_designs(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<Design>>, ApiError> {
    let page = query_handlers::list_designs(&params.to_request(), state.designs.as_ref()).await?;
    Ok(Json(page))
}

/// GET /{id}
async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Design>, ApiError> {
    let id = DomainId::from(id);
    let design = query_handlers::get_design(&id, state.designs.as_ref())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "design",
            id,
        })?;
    Ok(Json(design))
}

/// PATCH /{id}
#[instrument(skip(state, request), fields(design_id = %id))]
async fn update_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateDesignRequest>,
) -> Result<Json<Design>, ApiError> {
    let id = DomainId::from(id);
    let patch = DesignPatch {
        title: request.title,
        preview_url: request.preview_url,
    };
    let design = command_handlers::handle_update_design(
        &id,
        patch,
        state.designs.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound {
        resource: "design",
        id,
    })?;
    Ok(Json(design))
}

/// DELETE /{id}
#[instrument(skip(state), fields(design_id = %id))]
async fn delete_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = DomainId::from(id);
    let removed = command_handlers::handle_delete_design(
        &id,
        state.designs.as_ref(),
        &state.bus,
        state.clock.as_ref(),
    )
    .await?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound {
            resource: "design",
            id,
        })
    }
}

/// Returns the router for the designs context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_design).get(list_designs))
        .route(
            "/{id}",
            get(get_design).patch(update_design).delete(delete_design),
        )
}
