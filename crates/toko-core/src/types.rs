//! # Domain Types
//!
//! Core domain types used throughout Toko POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │   Transaction   │   │ TransactionDetail   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)           │   │
//! │  │  name           │   │  total_cents    │   │  transaction_id(FK) │   │
//! │  │  price_cents    │   │  created_at     │   │  product_id (FK)    │   │
//! │  │  stock          │   │  details[]      │   │  product_name (snap)│   │
//! │  │  category_id(FK)│   └─────────────────┘   │  quantity, subtotal │   │
//! │  └─────────────────┘                         └─────────────────────┘   │
//! │                                                                         │
//! │  CheckoutRequest/CheckoutItem are transient input types - never        │
//! │  persisted, only validated and handed to the checkout workflow.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `TransactionDetail` freezes the product name (and the unit price via the
//! subtotal) at the time of sale, so historical reports stay stable even if
//! a product is later renamed or repriced. This denormalization is
//! deliberate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier.
    pub id: i64,

    /// Category name, unique across the table.
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// When the category was created.
    pub created_at: DateTime<Utc>,

    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Compact category reference embedded in product responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier.
    pub id: i64,

    /// Display name shown to the cashier and snapshotted into sales.
    pub name: String,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level. Never negative; the checkout workflow is the
    /// only writer that decrements it.
    pub stock: i64,

    /// Category this product belongs to, if any. Cleared (not dangled)
    /// when the category is deleted.
    pub category_id: Option<i64>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Product row joined with its category name, for listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductWithCategory {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
    pub category_id: Option<i64>,
    /// Present when `category_id` resolves to a live category row.
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductWithCategory {
    /// The embedded category reference, when one exists.
    pub fn category(&self) -> Option<CategoryRef> {
        match (self.category_id, self.category_name.as_ref()) {
            (Some(id), Some(name)) => Some(CategoryRef {
                id,
                name: name.clone(),
            }),
            _ => None,
        }
    }
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update payload for a category. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Partial update payload for a product. Absent fields are left unchanged.
///
/// Note: admin CRUD may adjust `stock` directly (restocking); the checkout
/// workflow remains the only path that decrements it for sales.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed sale transaction.
///
/// Created exactly once per successful checkout and never mutated after
/// creation - there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    /// Unique identifier.
    pub id: i64,

    /// Total amount in cents: the sum of the details' subtotals, computed
    /// once at checkout time and never recomputed from client input.
    #[serde(rename = "total_amount")]
    pub total_cents: i64,

    /// When the transaction was committed.
    pub created_at: DateTime<Utc>,

    /// Line items, in request order. Loaded separately from the header.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line item in a transaction.
/// Uses the snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    /// Quantity sold. Always positive.
    pub quantity: i64,
    /// Line subtotal in cents: unit price at time of sale × quantity.
    #[serde(rename = "subtotal")]
    pub subtotal_cents: i64,
}

impl TransactionDetail {
    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Checkout Input
// =============================================================================

/// One (product, quantity) pair within a checkout request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// A cart submitted for checkout. Transient - never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Reporting
// =============================================================================

/// The best-selling product over a report window.
///
/// Field names follow the external API contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestSellingProduct {
    #[serde(rename = "nama")]
    pub name: String,

    #[serde(rename = "qty_terjual")]
    pub qty_sold: i64,
}

/// Revenue summary over an inclusive date window.
///
/// An empty window is a valid result: zero revenue, zero transactions,
/// and an empty best-seller record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportResponse {
    pub total_revenue: i64,

    #[serde(rename = "total_transaksi")]
    pub total_transactions: i64,

    #[serde(rename = "produk_terlaris")]
    pub best_selling: BestSellingProduct,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_wire_names() {
        let tx = Transaction {
            id: 1,
            total_cents: 3000,
            created_at: Utc::now(),
            details: vec![TransactionDetail {
                id: 1,
                transaction_id: 1,
                product_id: 7,
                product_name: "Kopi Susu".to_string(),
                quantity: 3,
                subtotal_cents: 3000,
            }],
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["total_amount"], 3000);
        assert_eq!(json["details"][0]["subtotal"], 3000);
        assert_eq!(json["details"][0]["product_name"], "Kopi Susu");
    }

    #[test]
    fn test_report_wire_names() {
        let report = ReportResponse {
            total_revenue: 5000,
            total_transactions: 2,
            best_selling: BestSellingProduct {
                name: "Teh Botol".to_string(),
                qty_sold: 12,
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_revenue"], 5000);
        assert_eq!(json["total_transaksi"], 2);
        assert_eq!(json["produk_terlaris"]["nama"], "Teh Botol");
        assert_eq!(json["produk_terlaris"]["qty_terjual"], 12);
    }

    #[test]
    fn test_empty_report_is_well_formed() {
        let report = ReportResponse::default();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_revenue"], 0);
        assert_eq!(json["total_transaksi"], 0);
        assert_eq!(json["produk_terlaris"]["nama"], "");
        assert_eq!(json["produk_terlaris"]["qty_terjual"], 0);
    }

    #[test]
    fn test_product_category_ref() {
        let row = ProductWithCategory {
            id: 1,
            name: "Indomie Goreng".to_string(),
            price_cents: 350,
            stock: 40,
            category_id: Some(2),
            category_name: Some("Makanan".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let cat = row.category().unwrap();
        assert_eq!(cat.id, 2);
        assert_eq!(cat.name, "Makanan");

        let orphan = ProductWithCategory {
            category_id: None,
            category_name: None,
            ..row
        };
        assert!(orphan.category().is_none());
    }
}
