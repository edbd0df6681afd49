//! Category CRUD handlers.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::ApiError;
use crate::response::{created, ok};
use crate::state::AppState;
use toko_core::validation::{validate_description, validate_name};
use toko_core::{CategoryInput, CategoryPatch};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list).post(create))
        .route(
            "/categories/{id}",
            get(get_by_id).put(update).delete(delete),
        )
}

/// GET /categories - all categories.
async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let categories = state.db.categories().list().await?;
    Ok(ok("Categories retrieved successfully", categories))
}

/// GET /categories/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let category = state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;

    Ok(ok("Category retrieved successfully", category))
}

/// POST /categories
async fn create(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> Result<Response, ApiError> {
    validate_name(&input.name)?;
    validate_description(input.description.as_deref())?;

    let category = state.db.categories().create(&input).await?;

    Ok(created("Category created successfully", category))
}

/// PUT /categories/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Response, ApiError> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    validate_description(patch.description.as_deref())?;

    let category = state.db.categories().update(id, &patch).await?;

    Ok(ok("Category updated successfully", category))
}

/// DELETE /categories/{id}
///
/// Dependent products get their category reference cleared by the schema;
/// the cache entry goes with it so a stale positive can't outlive the row.
async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, ApiError> {
    state.db.categories().delete(id).await?;
    state.category_cache.remove(&id);

    Ok(ok("Category deleted successfully", json!({ "id": id })))
}
