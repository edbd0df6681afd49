//! # Validation Module
//!
//! Input validation rules for Toko POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Axum extraction (Rust)                                       │
//! │  ├── Type validation (JSON deserialization)                            │
//! │  └── THIS MODULE: field and business rule validation                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (category name)                                │
//! │  ├── CHECK constraints (stock >= 0)                                    │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, ValidationError, ValidationResult};
use crate::types::CheckoutRequest;
use crate::{MAX_CHECKOUT_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category or product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 3 and 100 characters
///
/// ## Example
/// ```rust
/// use toko_core::validation::validate_name;
///
/// assert!(validate_name("Kopi Susu").is_ok());
/// assert!(validate_name("ab").is_err());
/// assert!(validate_name(&"x".repeat(200)).is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 3,
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an optional description.
///
/// ## Rules
/// - May be absent or empty
/// - Maximum 500 characters
pub fn validate_description(description: Option<&str>) -> ValidationResult<()> {
    if let Some(desc) = description {
        if desc.len() > 500 {
            return Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: 500,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price in cents. Must be strictly positive.
pub fn validate_price_cents(price_cents: i64) -> ValidationResult<()> {
    if price_cents <= 0 {
        return Err(ValidationError::NotPositive {
            field: "price_cents".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level. Must not be negative.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates a checkout request before it touches storage.
///
/// ## Rules
/// - Item list must not be empty
/// - Item list must not exceed [`MAX_CHECKOUT_ITEMS`]
/// - Each quantity must be a positive integer no larger than
///   [`MAX_ITEM_QUANTITY`]
///
/// Product existence and stock levels are NOT checked here - those are
/// decided against authoritative state inside the checkout transaction.
///
/// ## Example
/// ```rust
/// use toko_core::types::{CheckoutItem, CheckoutRequest};
/// use toko_core::validation::validate_checkout_request;
///
/// let request = CheckoutRequest {
///     items: vec![CheckoutItem { product_id: 1, quantity: 2 }],
/// };
/// assert!(validate_checkout_request(&request).is_ok());
///
/// let empty = CheckoutRequest { items: vec![] };
/// assert!(validate_checkout_request(&empty).is_err());
/// ```
pub fn validate_checkout_request(request: &CheckoutRequest) -> Result<(), CoreError> {
    if request.items.is_empty() {
        return Err(CoreError::EmptyCheckout);
    }

    if request.items.len() > MAX_CHECKOUT_ITEMS {
        return Err(CoreError::TooManyItems {
            max: MAX_CHECKOUT_ITEMS,
        });
    }

    for item in &request.items {
        if item.quantity <= 0 || item.quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
