use super::nullable;
use crate::model::{Review, Sandwich};
use serde::{Deserialize, Serialize};

/// Body of `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub order_id: u64,
    pub sandwich_id: u64,
    pub rating: u8,
    #[serde(default)]
    pub review_text: Option<String>,
}

/// Body of `PUT /reviews/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewUpdate {
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default, deserialize_with = "nullable")]
    pub review_text: Option<Option<String>>,
}

/// Query of `GET /reviews`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewFilter {
    pub sandwich_id: Option<u64>,
    pub order_id: Option<u64>,
}

/// A review with the reviewed sandwich embedded, when it still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewResponse {
    #[serde(flatten)]
    pub review: Review,
    pub sandwich: Option<Sandwich>,
}
