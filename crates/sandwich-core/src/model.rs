//! # Model Module
//!
//! Persistence rows for every entity of the shop.
//!
//! Rows are postcard-encoded into redb tables keyed by id. The same structs
//! are returned over HTTP; `Money` and `Percent` pick their wire form from
//! the serializer, so no separate response copies are needed.

use crate::money::{Money, Percent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// ENUMS
// =============================================================================

/// How an order leaves the shop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Takeout,
    Delivery,
}

/// Kitchen progress of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
}

/// How a customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Online,
}

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),* $(,)? }) => {
        impl $ty {
            /// The snake_case name used on the wire.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)*
                    other => Err(format!(
                        "Invalid {} value: '{}'",
                        stringify!($ty),
                        other
                    )),
                }
            }
        }
    };
}

wire_names!(OrderType { Takeout => "takeout", Delivery => "delivery" });
wire_names!(OrderStatus {
    Pending => "pending",
    Preparing => "preparing",
    Ready => "ready",
    Completed => "completed",
});
wire_names!(PaymentMethod {
    Cash => "cash",
    CreditCard => "credit_card",
    DebitCard => "debit_card",
    Online => "online",
});
wire_names!(PaymentStatus {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
});

// =============================================================================
// ROWS
// =============================================================================

/// An ingredient and its stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub item: String,
    pub amount: u64,
}

/// A menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sandwich {
    pub id: u64,
    pub sandwich_name: String,
    pub price: Money,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
}

/// How many units of a resource one sandwich consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub sandwich_id: u64,
    pub resource_id: u64,
    pub amount: u64,
}

/// A customer order. Line items live in [`OrderDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer_name: String,
    pub description: Option<String>,
    pub order_date: DateTime<Utc>,
    pub tracking_number: String,
    pub order_type: OrderType,
    pub order_status: OrderStatus,
    pub total_price: Money,
    pub promo_code_id: Option<u64>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: u64,
    pub order_id: u64,
    pub sandwich_id: u64,
    pub amount: u64,
}

/// The payment settling an order. At most one per order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub order_id: u64,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
}

/// A discount code customers can apply when ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionalCode {
    pub id: u64,
    pub code: String,
    pub discount_percent: Percent,
    pub expiration_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl PromotionalCode {
    /// Check whether the code has passed its expiration date.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| expires < now)
    }

    /// Check whether the code can be applied to an order right now.
    #[must_use]
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }
}

/// A customer's rating of a sandwich from a given order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub order_id: u64,
    pub sandwich_id: u64,
    pub rating: u8,
    pub review_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// TESTS
// =============================================================================
