//! # Toko POS API
//!
//! REST server in front of the checkout core.
//!
//! The interesting work happens in `toko-db` (the atomic checkout
//! transaction) and `toko-core` (validation, money). This crate is the
//! conventional REST shell: routing, JSON envelope, error-to-status
//! mapping, configuration, logging, and an advisory cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;
