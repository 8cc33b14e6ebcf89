//! Commerce error types.
//!
//! Everything here is a local failure scoped to the screen that triggered
//! it; remote failures live in the data crate.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Quantity below one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Requested more than the size has in stock.
    #[error("Insufficient stock for {product_id} ({size}): requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        size: String,
        requested: i64,
        available: i64,
    },

    /// Add-to-cart attempted without choosing a size.
    #[error("Please select a size")]
    SizeNotSelected,

    /// Add-to-cart attempted without choosing a color.
    #[error("Please select a color")]
    ColorNotSelected,

    /// The chosen size does not exist or has no stock.
    #[error("Selected size is out of stock")]
    SizeOutOfStock,

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Form validation failure shown inline.
    #[error("{0}")]
    Validation(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_messages_match_screen_copy() {
        assert_eq!(CommerceError::SizeNotSelected.to_string(), "Please select a size");
        assert_eq!(CommerceError::ColorNotSelected.to_string(), "Please select a color");
        assert_eq!(
            CommerceError::SizeOutOfStock.to_string(),
            "Selected size is out of stock"
        );
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = CommerceError::Validation("Passwords do not match".into());
        assert_eq!(err.to_string(), "Passwords do not match");
    }
}
