use super::{default_true, nullable};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Body of `POST /sandwiches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandwichCreate {
    pub sandwich_name: String,
    pub price: Money,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Body of `PUT /sandwiches/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SandwichUpdate {
    #[serde(default)]
    pub sandwich_name: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// Query of `GET /sandwiches`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SandwichFilter {
    pub category: Option<String>,
    pub is_available: Option<bool>,
}
