//! Router-level integration tests: real requests through the axum router
//! against a throwaway SQLite database, no network involved.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use pos_api::{routes, AppState};
use toko_db::{Database, DbConfig};

async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let config = DbConfig::new(dir.path().join("toko.db")).max_connections(5);
    let db = Database::new(config).await.expect("open database");
    let state = AppState::new(db, Duration::from_secs(60));
    (routes::router(state), dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn create_product(app: &Router, name: &str, price_cents: i64, stock: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/products",
        Some(json!({ "name": name, "price_cents": price_cents, "stock": stock })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create product: {body}");
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (app, _dir) = test_app().await;

    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/health/db", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn checkout_happy_path_decrements_stock() {
    let (app, _dir) = test_app().await;
    let product_id = create_product(&app, "Kopi Susu", 1000, 5).await;

    let (status, body) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "items": [{ "product_id": product_id, "quantity": 3 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "checkout: {body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total_amount"], 3000);
    assert_eq!(body["data"]["details"][0]["product_name"], "Kopi Susu");
    assert_eq!(body["data"]["details"][0]["quantity"], 3);
    assert_eq!(body["data"]["details"][0]["subtotal"], 3000);

    let (status, body) = send(&app, "GET", &format!("/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 2);
}

#[tokio::test]
async fn checkout_empty_cart_is_rejected_with_400() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, "POST", "/checkout", Some(json!({ "items": [] }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("checkout items cannot be empty"));
}

#[tokio::test]
async fn checkout_non_positive_quantity_is_rejected() {
    let (app, _dir) = test_app().await;
    let product_id = create_product(&app, "Teh Botol", 500, 10).await;

    let (status, _) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "items": [{ "product_id": product_id, "quantity": 0 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Stock untouched.
    let (_, body) = send(&app, "GET", &format!("/products/{product_id}"), None).await;
    assert_eq!(body["data"]["stock"], 10);
}

#[tokio::test]
async fn checkout_unknown_product_names_the_id() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "items": [{ "product_id": 9999, "quantity": 1 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("9999"));

    let (_, body) = send(&app, "GET", "/transactions", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn checkout_insufficient_stock_names_the_product() {
    let (app, _dir) = test_app().await;
    let product_id = create_product(&app, "Indomie Goreng", 350, 2).await;

    let (status, body) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "items": [{ "product_id": product_id, "quantity": 3 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Indomie Goreng"));

    let (_, body) = send(&app, "GET", &format!("/products/{product_id}"), None).await;
    assert_eq!(body["data"]["stock"], 2);
}

#[tokio::test]
async fn transactions_listing_includes_details() {
    let (app, _dir) = test_app().await;
    let a = create_product(&app, "Sate Ayam", 1500, 10).await;
    let b = create_product(&app, "Lontong", 500, 10).await;

    let (status, _) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "items": [
            { "product_id": a, "quantity": 2 },
            { "product_id": b, "quantity": 3 },
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/transactions", None).await;
    assert_eq!(status, StatusCode::OK);

    let transactions = body["data"].as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["total_amount"], 2 * 1500 + 3 * 500);
    assert_eq!(transactions[0]["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn report_defaults_to_today_and_handles_empty_windows() {
    let (app, _dir) = test_app().await;
    let product_id = create_product(&app, "Kopi Susu", 1000, 50).await;

    // Empty window: zeroes, no error.
    let (status, body) = send(
        &app,
        "GET",
        "/report?start_date=2000-01-01&end_date=2000-01-02",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_revenue"], 0);
    assert_eq!(body["data"]["total_transaksi"], 0);
    assert_eq!(body["data"]["produk_terlaris"]["nama"], "");
    assert_eq!(body["data"]["produk_terlaris"]["qty_terjual"], 0);

    let (status, _) = send(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "items": [{ "product_id": product_id, "quantity": 4 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // No dates: defaults to today, which contains the sale just made.
    let (status, body) = send(&app, "GET", "/report", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_revenue"], 4000);
    assert_eq!(body["data"]["total_transaksi"], 1);
    assert_eq!(body["data"]["produk_terlaris"]["nama"], "Kopi Susu");
    assert_eq!(body["data"]["produk_terlaris"]["qty_terjual"], 4);
}

#[tokio::test]
async fn report_rejects_malformed_dates() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, "GET", "/report?start_date=04-08-2026", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn category_crud_and_duplicate_rejection() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/categories",
        Some(json!({ "name": "Minuman", "description": "Semua minuman" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/categories",
        Some(json!({ "name": "Minuman" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Minuman"));

    let (status, body) = send(&app, "GET", &format!("/categories/{category_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Minuman");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/categories/{category_id}"),
        Some(json!({ "name": "Minuman Dingin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/categories/{category_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/categories/{category_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_category_clears_it_from_products() {
    let (app, _dir) = test_app().await;

    let (_, body) = send(&app, "POST", "/categories", Some(json!({ "name": "Snack" }))).await;
    let category_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "Kerupuk Udang",
            "price_cents": 250,
            "stock": 30,
            "category_id": category_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["category"]["name"], "Snack");

    let (status, _) = send(&app, "DELETE", &format!("/categories/{category_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    // Reference cleared: the category key is omitted entirely.
    assert!(body["data"].get("category").is_none());
}

#[tokio::test]
async fn product_validation_and_referential_checks() {
    let (app, _dir) = test_app().await;

    // Name too short → validation failure.
    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "ab", "price_cents": 100, "stock": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Non-positive price → validation failure.
    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "Gratisan", "price_cents": 0, "stock": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown category → business failure.
    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "Misterius", "price_cents": 100, "stock": 1, "category_id": 4242 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("4242"));

    // Unknown product id → 404 on direct lookup.
    let (status, _) = send(&app, "GET", "/products/31337", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_name_filter_is_case_insensitive() {
    let (app, _dir) = test_app().await;
    create_product(&app, "Kopi Susu", 1000, 5).await;
    create_product(&app, "Kopi Hitam", 900, 5).await;
    create_product(&app, "Teh Botol", 500, 5).await;

    let (status, body) = send(&app, "GET", "/products?name=kopi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/products", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}
