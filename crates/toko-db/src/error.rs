//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in pos-api) ← Mapped to an HTTP status + envelope           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client receives status code + message                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context.
/// Checkout outcomes (`ProductNotFound`, `InsufficientStock`) live here
/// because they are decided against authoritative state inside the storage
/// transaction, not from a cached read.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Checkout referenced a product id that does not exist.
    ///
    /// The whole checkout rolls back; the message identifies the id.
    #[error("product ID {0} not found")]
    ProductNotFound(i64),

    /// Checkout asked for more units than are in stock.
    ///
    /// Decided by the guarded decrement inside the checkout transaction,
    /// never by a point-in-time read. The whole checkout rolls back.
    #[error("insufficient stock for product: {name} (available {available}, requested {requested})")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate category name
    #[error("duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Creating a product with a non-existent category_id
    /// - Deleting a product that historical transaction details reference
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// The database was locked past the configured busy timeout.
    ///
    /// Surfaced as a distinguishable, retryable conflict: a concurrent
    /// checkout held the write lock longer than we were willing to wait.
    /// Re-issuing the request creates a NEW transaction - callers that
    /// need exactly-once must dedupe with their own idempotency key.
    #[error("database busy: write lock not acquired within the timeout")]
    Busy,

    /// Database connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True for conflicts a caller may safely retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DbError::Busy | DbError::PoolExhausted)
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound            → DbError::NotFound
/// sqlx::Error::Database("UNIQUE…")    → DbError::UniqueViolation
/// sqlx::Error::Database("FOREIGN…")   → DbError::ForeignKeyViolation
/// sqlx::Error::Database("locked")     → DbError::Busy  (retryable)
/// sqlx::Error::PoolTimedOut           → DbError::PoolExhausted
/// Other                               → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // UNIQUE: "UNIQUE constraint failed: <table>.<column>"
                // FK:     "FOREIGN KEY constraint failed"
                // Busy:   "database is locked" / "database table is locked"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("database is locked")
                    || msg.contains("database table is locked")
                {
                    DbError::Busy
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
