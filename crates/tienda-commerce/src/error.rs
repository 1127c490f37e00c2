//! Commerce error types.
//!
//! Messages are shown to the operator as-is.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in catalog, cart and checkout operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product {0} not found")]
    ProductNotFound(String),

    /// Stock does not cover the requested quantity.
    #[error("Product {name} has no stock available (requested {requested}, in stock {available})")]
    InsufficientStock {
        code: String,
        name: String,
        requested: i64,
        available: i64,
    },

    /// Product is past its expiry date.
    #[error("Product {code} - {name} expired {days} days ago")]
    ProductExpired {
        code: String,
        name: String,
        days: i64,
    },

    /// Delivery date is too close.
    #[error("Invalid delivery date {date}: must be on or after {earliest} ({min_days} days from today)")]
    InvalidDeliveryDate {
        date: NaiveDate,
        earliest: NaiveDate,
        min_days: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// No cart line with this id.
    #[error("Cart line {0} not found")]
    LineNotFound(u32),

    /// Nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// Remote product source failed.
    #[error("Pricing service unavailable: {0}")]
    SourceUnavailable(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Cart could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
