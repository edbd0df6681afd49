//! Checkout and transaction read endpoints.
//!
//! `POST /checkout` is the front door to THE core of this service: the
//! atomic cart-to-transaction conversion in
//! `toko_db::TransactionRepository::checkout`. The handler's own job is
//! deliberately small - shape validation with no storage access, then one
//! repository call that either fully commits or fully rolls back.

use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use crate::error::ApiError;
use crate::response::{created, ok};
use crate::state::AppState;
use toko_core::validation::validate_checkout_request;
use toko_core::CheckoutRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/transactions", get(list))
}

/// POST /checkout
///
/// Responses:
/// - 201 with the persisted transaction (details included)
/// - 400 when the cart is empty, a product is unknown, or stock is
///   insufficient - the message identifies the offending product
/// - 409 when the request lost a lock-wait race and may be retried
async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Response, ApiError> {
    // Rejects empty carts and non-positive quantities before any storage
    // access. Stock and existence are decided inside the transaction.
    validate_checkout_request(&request)?;

    let transaction = state.db.transactions().checkout(&request.items).await?;

    info!(
        transaction_id = transaction.id,
        total_cents = transaction.total_cents,
        items = transaction.details.len(),
        "Checkout completed"
    );

    Ok(created("Transaction completed successfully", transaction))
}

/// GET /transactions - every persisted transaction with its details.
async fn list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let transactions = state.db.transactions().get_all().await?;
    Ok(ok("Transactions retrieved successfully", transactions))
}
