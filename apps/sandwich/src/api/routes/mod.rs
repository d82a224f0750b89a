//! One router per entity, nested under its prefix by [`super::router`].
//!
//! Create returns 201 with the new row, delete returns 204 with no body,
//! everything else 200.

pub mod analytics;
pub mod order_details;
pub mod orders;
pub mod payments;
pub mod promotional_codes;
pub mod recipes;
pub mod resources;
pub mod reviews;
pub mod sandwiches;
