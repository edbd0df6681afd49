//! # toko-db: Database Layer for Toko POS
//!
//! This crate provides database access for the Toko POS backend.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Toko POS Data Flow                               │
//! │                                                                         │
//! │  Axum handler (POST /checkout)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      toko-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (category,    │    │  (embedded)  │  │   │
//! │  │   │               │    │  product,     │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  transaction, │    │ 001_init.sql │  │   │
//! │  │   │ WAL + FK on   │    │  report)      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Checkout Transaction
//!
//! The single place where concurrent requests race over shared mutable
//! state (product stock) is [`repository::transaction::TransactionRepository::checkout`].
//! Everything it does - stock validation, the decrement, the header and
//! detail inserts - happens inside one SQLite transaction, so a failure at
//! any step leaves no partial state behind and stock can never go negative.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::transaction::TransactionRepository;
