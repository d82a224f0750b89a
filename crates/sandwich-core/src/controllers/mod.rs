//! # Controllers Module
//!
//! One module per entity. Each adds its operations to [`Store`] as
//! inherent methods: validate the request, then run a single redb
//! transaction.
//!
//! [`Store`]: crate::Store

mod analytics;
mod order_details;
mod orders;
mod payments;
mod promotional_codes;
mod recipes;
mod resources;
mod reviews;
mod sandwiches;

use crate::error::{Result, ShopError};

/// Trim a required text field, rejecting blank values.
pub(crate) fn require_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShopError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Reject zero quantities.
pub(crate) fn require_positive(amount: u64, field: &str) -> Result<u64> {
    if amount == 0 {
        return Err(ShopError::Validation(format!("{field} must be at least 1")));
    }
    Ok(amount)
}

/// Treat blank optional text as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_helpers() {
        assert!(require_text("   ", "item").is_err());
        assert_eq!(require_text(" Bread ", "item").ok(), Some(String::from("Bread")));
        assert_eq!(optional_text(Some(String::from("  "))), None);
        assert!(require_positive(0, "amount").is_err());
    }
}
