//! Concurrent checkout tests.
//!
//! The stock invariant under fire: for any mix of concurrent checkouts,
//! no product's stock ever goes negative, and the final stock equals the
//! initial stock minus the sum of all successfully committed quantities.

use tempfile::TempDir;

use toko_core::{CheckoutItem, ProductInput};
use toko_db::{Database, DbConfig, DbError};

async fn test_db(max_connections: u32) -> (Database, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let config = DbConfig::new(dir.path().join("toko.db")).max_connections(max_connections);
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

/// Two checkouts race for stock that can only satisfy one of them.
/// The forbidden outcome is both committing (stock would go to -1).
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_checkouts_cannot_both_commit() {
    let (db, _dir) = test_db(4).await;
    let product_id = seed_product(&db, "Kopi Susu", 1000, 5).await;

    let db_a = db.clone();
    let db_b = db.clone();
    let a = tokio::spawn(async move {
        db_a.transactions()
            .checkout(&[CheckoutItem {
                product_id,
                quantity: 3,
            }])
            .await
    });
    let b = tokio::spawn(async move {
        db_b.transactions()
            .checkout(&[CheckoutItem {
                product_id,
                quantity: 3,
            }])
            .await
    });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();

    // 3 + 3 > 5, so at most one can commit. (Exactly one, unless a lock
    // timeout turned the loser into a retryable Busy failure.)
    assert!(successes <= 1, "both racing checkouts committed");

    let stock = db
        .products()
        .get_by_id(product_id)
        .await
        .unwrap()
        .unwrap()
        .stock;
    assert!(stock >= 0, "stock went negative: {stock}");
    assert_eq!(stock, 5 - 3 * successes as i64);

    let committed = db.transactions().get_all().await.unwrap();
    assert_eq!(committed.len(), successes);
}

/// Many single-unit checkouts against a small stock pool: exactly `stock`
/// of them can ever commit, the rest fail with insufficient stock (or a
/// retryable Busy under extreme lock pressure).
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn stress_final_stock_matches_committed_quantity() {
    const INITIAL_STOCK: i64 = 50;
    const ATTEMPTS: usize = 100;

    let (db, _dir) = test_db(10).await;
    let product_id = seed_product(&db, "Teh Botol", 500, INITIAL_STOCK).await;

    let mut handles = Vec::with_capacity(ATTEMPTS);
    for _ in 0..ATTEMPTS {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.transactions()
                .checkout(&[CheckoutItem {
                    product_id,
                    quantity: 1,
                }])
                .await
        }));
    }

    let mut successes = 0i64;
    let mut insufficient = 0usize;
    let mut busy = 0usize;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DbError::InsufficientStock { .. }) => insufficient += 1,
            Err(DbError::Busy) => busy += 1,
            Err(other) => panic!("unexpected checkout error: {other:?}"),
        }
    }

    let stock = db
        .products()
        .get_by_id(product_id)
        .await
        .unwrap()
        .unwrap()
        .stock;

    assert!(stock >= 0, "stock went negative: {stock}");
    assert_eq!(stock, INITIAL_STOCK - successes);
    assert!(successes <= INITIAL_STOCK);
    assert_eq!(successes as usize + insufficient + busy, ATTEMPTS);

    // Every committed attempt left a durable transaction behind.
    let committed = db.transactions().get_all().await.unwrap();
    assert_eq!(committed.len(), successes as usize);
    for tx in &committed {
        assert_eq!(tx.total_cents, 500);
    }
}

/// Concurrent checkouts of DIFFERENT products still serialize on SQLite's
/// single writer, but all of them must land.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_products_all_commit() {
    let (db, _dir) = test_db(8).await;

    let mut product_ids = Vec::new();
    for i in 0..8 {
        product_ids.push(seed_product(&db, &format!("Produk {i}"), 100 * (i + 1), 10).await);
    }

    let mut handles = Vec::new();
    for &product_id in &product_ids {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.transactions()
                .checkout(&[CheckoutItem {
                    product_id,
                    quantity: 4,
                }])
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("uncontended checkout commits");
    }

    for &product_id in &product_ids {
        let stock = db
            .products()
            .get_by_id(product_id)
            .await
            .unwrap()
            .unwrap()
            .stock;
        assert_eq!(stock, 6);
    }
}
