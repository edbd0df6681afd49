//! # Repository Implementations
//!
//! One repository per aggregate:
//!
//! - [`category`] - Category CRUD
//! - [`product`] - Product CRUD (reads are point-in-time snapshots; the
//!   only sale-path stock writer is the checkout transaction)
//! - [`transaction`] - Checkout workflow and transaction reads
//! - [`report`] - Read-only revenue aggregation

pub mod category;
pub mod product;
pub mod report;
pub mod transaction;
