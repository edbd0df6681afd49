//! Product CRUD handlers.
//!
//! Product reads are point-in-time snapshots. They are fine for listings
//! and admin screens but are never consulted by the checkout workflow,
//! which decides against authoritative state inside its own transaction.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;
use crate::response::{created, ok};
use crate::state::AppState;
use toko_core::validation::{validate_name, validate_price_cents, validate_stock};
use toko_core::{CategoryRef, Product, ProductInput, ProductPatch, ProductWithCategory};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/{id}", get(get_by_id).put(update).delete(delete))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    name: Option<String>,
}

/// Wire shape for a product: the category embedded as `{id, name}`.
#[derive(Debug, Serialize)]
struct ProductResponse {
    id: i64,
    name: String,
    price_cents: i64,
    stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<CategoryRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductWithCategory> for ProductResponse {
    fn from(row: ProductWithCategory) -> Self {
        let category = row.category();
        ProductResponse {
            id: row.id,
            name: row.name,
            price_cents: row.price_cents,
            stock: row.stock,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            price_cents: product.price_cents,
            stock: product.stock,
            category: None,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// GET /products - all products, optionally filtered by name substring.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let products = state.db.products().list(query.name.as_deref()).await?;

    let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(ok("Products retrieved successfully", body))
}

/// GET /products/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    Ok(ok(
        "Product retrieved successfully",
        ProductResponse::from(product),
    ))
}

/// POST /products
async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<Response, ApiError> {
    validate_name(&input.name)?;
    validate_price_cents(input.price_cents)?;
    validate_stock(input.stock)?;

    // Advisory pre-check for a friendly message; the FK is the enforcement.
    if let Some(category_id) = input.category_id {
        if !state.category_exists(category_id).await? {
            return Err(ApiError::business(format!(
                "invalid category_id: {category_id}"
            )));
        }
    }

    let product = state.db.products().create(&input).await?;

    // Re-read with the category joined for the response body.
    let body = state
        .db
        .products()
        .get_by_id(product.id)
        .await?
        .map(ProductResponse::from)
        .unwrap_or_else(|| ProductResponse::from(product));

    Ok(created("Product created successfully", body))
}

/// PUT /products/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ProductPatch>,
) -> Result<Response, ApiError> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validate_price_cents(price_cents)?;
    }
    if let Some(stock) = patch.stock {
        validate_stock(stock)?;
    }
    if let Some(category_id) = patch.category_id {
        if !state.category_exists(category_id).await? {
            return Err(ApiError::business(format!(
                "invalid category_id: {category_id}"
            )));
        }
    }

    state.db.products().update(id, &patch).await?;

    let body = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(ProductResponse::from)
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    Ok(ok("Product updated successfully", body))
}

/// DELETE /products/{id}
async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, ApiError> {
    state.db.products().delete(id).await?;

    Ok(ok("Product deleted successfully", json!({ "id": id })))
}
