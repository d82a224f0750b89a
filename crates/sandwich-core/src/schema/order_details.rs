use serde::{Deserialize, Serialize};

/// Body of `POST /order-details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailCreate {
    pub order_id: u64,
    pub sandwich_id: u64,
    pub amount: u64,
}

/// Body of `PUT /order-details/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailUpdate {
    #[serde(default)]
    pub sandwich_id: Option<u64>,
    #[serde(default)]
    pub amount: Option<u64>,
}

/// Query of `GET /order-details`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderDetailFilter {
    pub order_id: Option<u64>,
}
