//! Route assembly.
//!
//! One module per resource, each exposing a `router()` merged here. The
//! resulting `Router` is state-free (`with_state` applied) so tests can
//! drive it directly with `tower::ServiceExt::oneshot`.

mod categories;
mod health;
mod products;
mod reports;
mod transactions;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .merge(health::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(transactions::router())
        .merge(reports::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / - service banner and endpoint map.
async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Toko POS API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /health": "Basic health check",
            "GET /health/db": "Database health check",
            "GET /categories": "Get all categories",
            "POST /categories": "Create new category",
            "GET /categories/{id}": "Get category by ID",
            "PUT /categories/{id}": "Update category",
            "DELETE /categories/{id}": "Delete category",
            "GET /products": "Get all products (optional ?name= filter)",
            "POST /products": "Create new product",
            "GET /products/{id}": "Get product by ID",
            "PUT /products/{id}": "Update product",
            "DELETE /products/{id}": "Delete product",
            "POST /checkout": "Convert a cart into a transaction",
            "GET /transactions": "Get all transactions with details",
            "GET /report": "Revenue report over a date window",
        },
    }))
}
