use super::default_true;
use crate::money::Percent;
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /promotional-codes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionalCodeCreate {
    pub code: String,
    pub discount_percent: Percent,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Body of `PUT /promotional-codes/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromotionalCodeUpdate {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<Percent>,
    #[serde(default, deserialize_with = "timestamp::nullable")]
    pub expiration_date: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Query of `GET /promotional-codes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromotionalCodeFilter {
    pub is_active: Option<bool>,
}
