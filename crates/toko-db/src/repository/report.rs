//! # Report Repository
//!
//! Read-only revenue aggregation over persisted transactions. No
//! concurrency hazard: reports only ever read committed rows, so repeated
//! calls over a fixed window return identical results until new
//! transactions land.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DbError, DbResult};
use toko_core::{BestSellingProduct, ReportResponse};

/// Repository for sales reporting.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Summarizes revenue over an inclusive calendar-date window (UTC).
    ///
    /// ## Window Semantics
    /// Both dates are whole days: the window runs from `start` 00:00:00 up
    /// to but not including the day after `end`. The half-open upper bound
    /// is equivalent to "23:59:59 inclusive" and also captures sub-second
    /// timestamps on the final day.
    ///
    /// ## Best Seller
    /// The product name with the highest summed quantity across details of
    /// in-window transactions. Ties break by name ascending, so the result
    /// is deterministic. An empty window yields zero revenue, zero
    /// transactions and an empty best-seller record - never an error.
    pub async fn sales_report(&self, start: NaiveDate, end: NaiveDate) -> DbResult<ReportResponse> {
        let window_start: DateTime<Utc> = start.and_time(NaiveTime::MIN).and_utc();
        let window_end: DateTime<Utc> = end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DbError::Internal("report end date out of range".to_string()))?
            .and_time(NaiveTime::MIN)
            .and_utc();

        let (total_revenue, total_transactions) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COALESCE(SUM(total_cents), 0), COUNT(*)
            FROM transactions
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_one(&self.pool)
        .await?;

        let best = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT d.product_name, SUM(d.quantity) AS qty_sold
            FROM transaction_details d
            JOIN transactions t ON t.id = d.transaction_id
            WHERE t.created_at >= ?1 AND t.created_at < ?2
            GROUP BY d.product_name
            ORDER BY qty_sold DESC, d.product_name ASC
            LIMIT 1
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_optional(&self.pool)
        .await?;

        let best_selling = match best {
            Some((name, qty_sold)) => BestSellingProduct { name, qty_sold },
            None => BestSellingProduct::default(),
        };

        Ok(ReportResponse {
            total_revenue,
            total_transactions,
            best_selling,
        })
    }
}
