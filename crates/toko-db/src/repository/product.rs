//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Stock Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Who Touches products.stock                          │
//! │                                                                         │
//! │  Admin CRUD (this repository)                                          │
//! │  └── create / update set absolute stock levels (restocking)            │
//! │                                                                         │
//! │  Checkout workflow (transaction repository)                            │
//! │  └── the ONLY path that decrements stock for a sale, inside one        │
//! │      guarded, atomic transaction                                       │
//! │                                                                         │
//! │  Everything else reads a point-in-time snapshot that must never be     │
//! │  used to make a checkout decision.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use toko_core::{Product, ProductInput, ProductPatch, ProductWithCategory};

const SELECT_WITH_CATEGORY: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price_cents,
        p.stock,
        p.category_id,
        c.name AS category_name,
        p.created_at,
        p.updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products with their category names, optionally filtered by a
    /// case-insensitive name substring.
    pub async fn list(&self, name_filter: Option<&str>) -> DbResult<Vec<ProductWithCategory>> {
        let products = match name_filter {
            Some(filter) if !filter.is_empty() => {
                let pattern = format!("%{}%", filter);
                sqlx::query_as::<_, ProductWithCategory>(&format!(
                    "{SELECT_WITH_CATEGORY} WHERE p.name LIKE ?1 ORDER BY p.id"
                ))
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, ProductWithCategory>(&format!(
                    "{SELECT_WITH_CATEGORY} ORDER BY p.id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(products)
    }

    /// Gets a product by ID, with its category name.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<ProductWithCategory>> {
        let product = sqlx::query_as::<_, ProductWithCategory>(&format!(
            "{SELECT_WITH_CATEGORY} WHERE p.id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Creates a new product.
    ///
    /// An invalid `category_id` is rejected by the foreign key constraint;
    /// callers usually pre-check it for a friendlier message.
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        debug!(name = %input.name, price_cents = %input.price_cents, "Creating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price_cents, stock, category_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&input.name)
        .bind(input.price_cents)
        .bind(input.stock)
        .bind(input.category_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
            price_cents: input.price_cents,
            stock: input.stock,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update to a product.
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> DbResult<Product> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        let mut product = Product {
            id: current.id,
            name: current.name,
            price_cents: current.price_cents,
            stock: current.stock,
            category_id: current.category_id,
            created_at: current.created_at,
            updated_at: current.updated_at,
        };

        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(price_cents) = patch.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(category_id) = patch.category_id {
            product.category_id = Some(category_id);
        }
        product.updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, price_cents = ?3, stock = ?4, category_id = ?5, updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.category_id)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(product)
    }

    /// Deletes a product.
    ///
    /// Products referenced by historical transaction details are protected
    /// by the foreign key and surface as a constraint violation.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}
