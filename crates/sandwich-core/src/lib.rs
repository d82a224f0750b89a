//! # Sandwich Core
//!
//! Models, controllers and storage for the sandwich shop.
//!
//! This crate is synchronous and has no network code. Everything goes
//! through [`Store`], a redb database with one table per entity:
//!
//! - [`model`] - persistence rows
//! - [`schema`] - request and response shapes
//! - [`money`] - fixed-point money and percentages
//! - [`stock`] - ingredient availability checks
//! - [`timestamp`] - lenient date parsing for query parameters
//!
//! Operations are inherent methods on [`Store`]; each mutating call runs in
//! a single write transaction.

pub mod error;
pub mod model;
pub mod money;
pub mod schema;
pub mod seed;
pub mod stock;
pub mod timestamp;

mod controllers;
mod storage;

pub use error::{Result, ShopError};
pub use model::{
    Order, OrderDetail, OrderStatus, OrderType, Payment, PaymentMethod, PaymentStatus,
    PromotionalCode, Recipe, Resource, Review, Sandwich,
};
pub use money::{Money, Percent};
pub use seed::SeedSummary;
pub use storage::{Store, StoreStatus};
