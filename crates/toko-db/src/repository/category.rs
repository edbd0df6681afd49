//! # Category Repository
//!
//! Database operations for product categories.
//!
//! ## Deletion Policy
//! Deleting a category must never leave products pointing at a removed
//! row. The schema declares `products.category_id ... ON DELETE SET NULL`,
//! so the reference is cleared in the same statement that removes the
//! category.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use toko_core::{Category, CategoryInput, CategoryPatch};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Gets all categories, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Gets a category by its unique name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Checks whether a category id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Creates a new category.
    ///
    /// Rejects duplicate names with a friendly error before the UNIQUE
    /// constraint would fire.
    pub async fn create(&self, input: &CategoryInput) -> DbResult<Category> {
        debug!(name = %input.name, "Creating category");

        if self.find_by_name(&input.name).await?.is_some() {
            return Err(DbError::duplicate("category name", &input.name));
        }

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update to a category.
    pub async fn update(&self, id: i64, patch: &CategoryPatch) -> DbResult<Category> {
        let mut category = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Category", id))?;

        if let Some(name) = &patch.name {
            // Renaming onto another category's name violates uniqueness.
            if let Some(existing) = self.find_by_name(name).await? {
                if existing.id != id {
                    return Err(DbError::duplicate("category name", name));
                }
            }
            category.name = name.clone();
        }
        if let Some(description) = &patch.description {
            category.description = Some(description.clone());
        }
        category.updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = ?2, description = ?3, updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(category)
    }

    /// Deletes a category. Dependent products get their category reference
    /// cleared by the `ON DELETE SET NULL` foreign key.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}
