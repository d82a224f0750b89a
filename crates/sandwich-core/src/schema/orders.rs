use super::nullable;
use crate::model::{Order, OrderDetail, OrderStatus, OrderType};
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub sandwich_id: u64,
    pub amount: u64,
}

impl OrderLine {
    #[must_use]
    pub fn new(sandwich_id: u64, amount: u64) -> Self {
        Self {
            sandwich_id,
            amount,
        }
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_type: OrderType,
    /// Code string, validated against the promotional codes table.
    #[serde(default)]
    pub promo_code: Option<String>,
    pub order_details: Vec<OrderLine>,
}

impl OrderCreate {
    /// A takeout order with no description or promo code.
    #[must_use]
    pub fn takeout(customer_name: impl Into<String>, lines: Vec<OrderLine>) -> Self {
        Self {
            customer_name: customer_name.into(),
            description: None,
            order_type: OrderType::Takeout,
            promo_code: None,
            order_details: lines,
        }
    }

    /// Attach a promo code.
    #[must_use]
    pub fn with_promo(mut self, code: impl Into<String>) -> Self {
        self.promo_code = Some(code.into());
        self
    }
}

/// Body of `PUT /orders/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub order_status: Option<OrderStatus>,
}

/// An order with its line items embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub order_details: Vec<OrderDetail>,
}

/// Query of `GET /orders` and the range half of `GET /analytics/revenue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub end_date: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Check whether `at` falls inside the range. Both bounds are inclusive.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start_date.is_none_or(|start| at >= start) && self.end_date.is_none_or(|end| at <= end)
    }
}
