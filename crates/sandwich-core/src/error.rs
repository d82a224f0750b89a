//! # Error Module
//!
//! The single error type returned by every store operation.

use thiserror::Error;

/// Errors produced by the sandwich shop core.
#[derive(Debug, Error)]
pub enum ShopError {
    /// A referenced row does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request is well-formed but breaks a business rule.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness or reference constraint would be violated.
    #[error("{0}")]
    Conflict(String),

    /// An order needs more ingredients than are in stock.
    #[error("Insufficient ingredients: {}", .0.join("; "))]
    InsufficientStock(Vec<String>),

    /// The embedded database failed.
    #[error("Storage error: {0}")]
    Storage(#[from] redb::Error),

    /// A stored row could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(#[from] postcard::Error),
}

impl ShopError {
    /// The canonical "Id not found!" error for a missing row.
    #[must_use]
    pub fn missing_id() -> Self {
        Self::NotFound(String::from("Id not found!"))
    }

    /// Check whether this error is caused by the storage layer.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Codec(_))
    }
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, ShopError>;

macro_rules! storage_error {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for ShopError {
                fn from(err: $source) -> Self {
                    Self::Storage(err.into())
                }
            }
        )*
    };
}

storage_error!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_joins_shortages() {
        let err = ShopError::InsufficientStock(vec![
            String::from("Insufficient Bread: need 4, have 2"),
            String::from("Resource ID 9 not found"),
        ]);
        assert_eq!(
            err.to_string(),
            "Insufficient ingredients: Insufficient Bread: need 4, have 2; Resource ID 9 not found"
        );
    }

    #[test]
    fn only_storage_errors_are_internal() {
        assert!(!ShopError::missing_id().is_internal());
        assert!(!ShopError::Conflict(String::from("dup")).is_internal());
        assert!(ShopError::Codec(postcard::Error::DeserializeUnexpectedEnd).is_internal());
    }
}
