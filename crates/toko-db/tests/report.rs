//! Report aggregation tests.

use chrono::{Days, Utc};
use tempfile::TempDir;

use toko_core::{CheckoutItem, ProductInput};
use toko_db::{Database, DbConfig};

async fn test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let config = DbConfig::new(dir.path().join("toko.db")).max_connections(5);
    let db = Database::new(config).await.expect("open database");
    (db, dir)
}

async fn seed_product(db: &Database, name: &str, price_cents: i64, stock: i64) -> i64 {
    db.products()
        .create(&ProductInput {
            name: name.to_string(),
            price_cents,
            stock,
            category_id: None,
        })
        .await
        .expect("create product")
        .id
}

async fn buy(db: &Database, product_id: i64, quantity: i64) {
    db.transactions()
        .checkout(&[CheckoutItem {
            product_id,
            quantity,
        }])
        .await
        .expect("checkout succeeds");
}

#[tokio::test]
async fn empty_window_reports_zeroes_without_error() {
    let (db, _dir) = test_db().await;

    let today = Utc::now().date_naive();
    let report = db.reports().sales_report(today, today).await.unwrap();

    assert_eq!(report.total_revenue, 0);
    assert_eq!(report.total_transactions, 0);
    assert_eq!(report.best_selling.name, "");
    assert_eq!(report.best_selling.qty_sold, 0);
}

#[tokio::test]
async fn report_sums_revenue_and_counts_transactions() {
    let (db, _dir) = test_db().await;
    let kopi = seed_product(&db, "Kopi Susu", 1000, 50).await;
    let teh = seed_product(&db, "Teh Botol", 500, 50).await;

    buy(&db, kopi, 3).await; // 3000
    buy(&db, teh, 4).await; // 2000
    buy(&db, kopi, 1).await; // 1000

    let today = Utc::now().date_naive();
    let report = db.reports().sales_report(today, today).await.unwrap();

    assert_eq!(report.total_revenue, 6000);
    assert_eq!(report.total_transactions, 3);
    // Teh Botol sold 4 units, Kopi Susu 3 + 1 = 4: tied, name ascending
    // picks "Kopi Susu".
    assert_eq!(report.best_selling.name, "Kopi Susu");
    assert_eq!(report.best_selling.qty_sold, 4);
}

#[tokio::test]
async fn report_best_seller_by_quantity_not_revenue() {
    let (db, _dir) = test_db().await;
    let mahal = seed_product(&db, "Sate Kambing", 5000, 50).await;
    let murah = seed_product(&db, "Kerupuk", 100, 50).await;

    buy(&db, mahal, 2).await; // 10000 revenue, 2 units
    buy(&db, murah, 9).await; // 900 revenue, 9 units

    let today = Utc::now().date_naive();
    let report = db.reports().sales_report(today, today).await.unwrap();

    assert_eq!(report.total_revenue, 10900);
    assert_eq!(report.best_selling.name, "Kerupuk");
    assert_eq!(report.best_selling.qty_sold, 9);
}

#[tokio::test]
async fn report_excludes_transactions_outside_the_window() {
    let (db, _dir) = test_db().await;
    let kopi = seed_product(&db, "Kopi Susu", 1000, 50).await;
    buy(&db, kopi, 2).await;

    let today = Utc::now().date_naive();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();

    // A window ending yesterday misses today's sale.
    let before = db
        .reports()
        .sales_report(yesterday, yesterday)
        .await
        .unwrap();
    assert_eq!(before.total_transactions, 0);

    // A window starting tomorrow misses it too.
    let after = db.reports().sales_report(tomorrow, tomorrow).await.unwrap();
    assert_eq!(after.total_transactions, 0);

    // A wide window catches it.
    let wide = db.reports().sales_report(yesterday, tomorrow).await.unwrap();
    assert_eq!(wide.total_transactions, 1);
    assert_eq!(wide.total_revenue, 2000);
}

#[tokio::test]
async fn report_is_idempotent_over_a_fixed_window() {
    let (db, _dir) = test_db().await;
    let kopi = seed_product(&db, "Kopi Susu", 1000, 50).await;
    buy(&db, kopi, 2).await;
    buy(&db, kopi, 5).await;

    let today = Utc::now().date_naive();
    let first = db.reports().sales_report(today, today).await.unwrap();
    let second = db.reports().sales_report(today, today).await.unwrap();

    assert_eq!(first.total_revenue, second.total_revenue);
    assert_eq!(first.total_transactions, second.total_transactions);
    assert_eq!(first.best_selling.name, second.best_selling.name);
    assert_eq!(first.best_selling.qty_sold, second.best_selling.qty_sold);
}
