//! # Schema Module
//!
//! Request and response shapes for every entity.
//!
//! - `*Create` bodies carry every required field.
//! - `*Update` bodies are partial: absent fields are left unchanged.
//! - `*Filter` structs are the optional query parameters of list endpoints.
//!
//! Rows from [`crate::model`] are returned as-is where no extra data is
//! embedded.

mod analytics;
mod order_details;
mod orders;
mod payments;
mod promotional_codes;
mod recipes;
mod resources;
mod reviews;
mod sandwiches;

pub use analytics::*;
pub use order_details::*;
pub use orders::*;
pub use payments::*;
pub use promotional_codes::*;
pub use recipes::*;
pub use resources::*;
pub use reviews::*;
pub use sandwiches::*;

use serde::{Deserialize, Deserializer};

/// `deserialize_with` helper for nullable update fields.
///
/// Absent means `None` (leave unchanged), `null` means `Some(None)` (clear).
pub(crate) fn nullable<'de, T, D>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

pub(crate) fn default_true() -> bool {
    true
}
