//! # Transaction Repository
//!
//! The checkout workflow and transaction reads.
//!
//! ## Checkout: the one place requests race
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Atomic Unit                                 │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    for each line item, in request order:                                │
//! │      1. UPDATE products                                                 │
//! │         SET stock = stock - qty                                         │
//! │         WHERE id = ? AND stock >= qty      ← guarded decrement          │
//! │      2. rows_affected == 0?                                             │
//! │         ├── row absent        → product not found  → ROLLBACK           │
//! │         └── guard failed      → insufficient stock → ROLLBACK           │
//! │      3. SELECT name, price_cents           ← snapshot for the detail    │
//! │      4. subtotal = price × qty; total += subtotal                       │
//! │    INSERT transaction header (computed total)                           │
//! │    INSERT one detail row per line item (name snapshot)                  │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The check and the write are ONE statement, so two line items for      │
//! │  the same product in one request compound against the original         │
//! │  stock, and two concurrent checkouts serialize on the write lock.      │
//! │  Nothing is visible to other connections before COMMIT.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A request that waits on the write lock past the configured busy timeout
//! fails with [`DbError::Busy`] - a distinguishable, retryable conflict.
//! Dropping the in-flight future rolls the transaction back.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use toko_core::{CheckoutItem, Money, Transaction, TransactionDetail};

/// Repository for the checkout workflow and transaction reads.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Converts a cart of line items into a persisted transaction and the
    /// matching stock decrements, all-or-nothing.
    ///
    /// ## Arguments
    /// * `items` - non-empty, positive-quantity line items in request
    ///   order. Callers validate shape up front (empty carts are rejected
    ///   before any storage access); the guards here are the storage-side
    ///   backstop.
    ///
    /// ## Returns
    /// The persisted transaction including its detail rows.
    ///
    /// ## Failure Semantics
    /// Any error - unknown product, insufficient stock, constraint or
    /// connection failure - rolls back the entire unit. No partial stock
    /// decrement or partial header/detail rows are ever visible.
    pub async fn checkout(&self, items: &[CheckoutItem]) -> DbResult<Transaction> {
        if items.is_empty() {
            return Err(DbError::Internal(
                "checkout requires at least one line item".to_string(),
            ));
        }
        if items.iter().any(|item| item.quantity <= 0) {
            // A non-positive quantity would turn the guarded decrement
            // into an increment.
            return Err(DbError::Internal(
                "checkout quantities must be positive".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let mut total = Money::zero();
        // (product_id, name snapshot, quantity, subtotal)
        let mut lines: Vec<(i64, String, i64, Money)> = Vec::with_capacity(items.len());

        for item in items {
            // Guarded decrement: the stock check and the write are a single
            // atomic statement against current in-transaction state, so a
            // later line for the same product sees this line's decrement.
            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - ?1, updated_at = ?2
                WHERE id = ?3 AND stock >= ?1
                "#,
            )
            .bind(item.quantity)
            .bind(now)
            .bind(item.product_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Zero rows means the row is absent or the guard failed;
                // one read tells them apart. Returning drops `tx`, which
                // rolls back everything done so far.
                let existing =
                    sqlx::query_as::<_, (String, i64)>("SELECT name, stock FROM products WHERE id = ?1")
                        .bind(item.product_id)
                        .fetch_optional(&mut *tx)
                        .await?;

                return Err(match existing {
                    None => DbError::ProductNotFound(item.product_id),
                    Some((name, stock)) => DbError::InsufficientStock {
                        name,
                        available: stock,
                        requested: item.quantity,
                    },
                });
            }

            // Snapshot name and price for the detail row. Same transaction,
            // so this is the exact state the decrement acted on.
            let (name, price_cents) = sqlx::query_as::<_, (String, i64)>(
                "SELECT name, price_cents FROM products WHERE id = ?1",
            )
            .bind(item.product_id)
            .fetch_one(&mut *tx)
            .await?;

            let subtotal = Money::from_cents(price_cents).multiply_quantity(item.quantity);
            total += subtotal;
            lines.push((item.product_id, name, item.quantity, subtotal));

            debug!(
                product_id = item.product_id,
                quantity = item.quantity,
                subtotal = %subtotal,
                "Checkout line validated"
            );
        }

        let header = sqlx::query("INSERT INTO transactions (total_cents, created_at) VALUES (?1, ?2)")
            .bind(total.cents())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        let transaction_id = header.last_insert_rowid();

        let mut details = Vec::with_capacity(lines.len());
        for (product_id, product_name, quantity, subtotal) in lines {
            let inserted = sqlx::query(
                r#"
                INSERT INTO transaction_details
                    (transaction_id, product_id, product_name, quantity, subtotal_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(transaction_id)
            .bind(product_id)
            .bind(&product_name)
            .bind(quantity)
            .bind(subtotal.cents())
            .execute(&mut *tx)
            .await?;

            details.push(TransactionDetail {
                id: inserted.last_insert_rowid(),
                transaction_id,
                product_id,
                product_name,
                quantity,
                subtotal_cents: subtotal.cents(),
            });
        }

        tx.commit().await?;

        info!(
            transaction_id,
            total = %total,
            items = details.len(),
            "Checkout committed"
        );

        Ok(Transaction {
            id: transaction_id,
            total_cents: total.cents(),
            created_at: now,
            details,
        })
    }

    /// Gets all transactions with their details, oldest first.
    pub async fn get_all(&self) -> DbResult<Vec<Transaction>> {
        let mut transactions = sqlx::query_as::<_, Transaction>(
            "SELECT id, total_cents, created_at FROM transactions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal_cents
            FROM transaction_details
            ORDER BY transaction_id, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_transaction: HashMap<i64, Vec<TransactionDetail>> = HashMap::new();
        for detail in details {
            by_transaction
                .entry(detail.transaction_id)
                .or_default()
                .push(detail);
        }

        for transaction in &mut transactions {
            transaction.details = by_transaction.remove(&transaction.id).unwrap_or_default();
        }

        Ok(transactions)
    }

    /// Gets a single transaction with its details.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            "SELECT id, total_cents, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut transaction) = transaction else {
            return Ok(None);
        };

        transaction.details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal_cents
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(transaction))
    }
}
