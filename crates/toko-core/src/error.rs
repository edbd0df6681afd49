//! # Error Types
//!
//! Domain-specific error types for toko-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  toko-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  toko-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  pos-api errors (in app)                                               │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are reported
/// synchronously to the caller; none are retried automatically.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout request contained no line items.
    ///
    /// ## When This Occurs
    /// - Client posts `{"items": []}`
    ///
    /// Rejected before any storage access.
    #[error("checkout items cannot be empty")]
    EmptyCheckout,

    /// A line item carried a non-positive quantity.
    #[error("quantity for product {product_id} must be a positive integer, got {quantity}")]
    InvalidQuantity { product_id: i64, quantity: i64 },

    /// Checkout request exceeded the line item cap.
    #[error("checkout cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// Product referenced by a line item does not exist.
    ///
    /// ## When This Occurs
    /// - Checkout names a product id that was never created or was deleted
    ///
    /// The whole checkout fails with no partial effects.
    #[error("product ID {0} not found")]
    ProductNotFound(i64),

    /// Insufficient stock to satisfy a line item.
    ///
    /// ## Checkout Workflow
    /// ```text
    /// Line item (qty: 5)
    ///      │
    ///      ▼
    /// Guarded decrement: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Kopi Susu", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Whole checkout rolls back
    /// ```
    #[error("insufficient stock for product: {name} (available {available}, requested {requested})")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when client input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    NotPositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Field value has an invalid format.
    #[error("{field} is invalid: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
