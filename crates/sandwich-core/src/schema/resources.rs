use serde::{Deserialize, Serialize};

/// Body of `POST /resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCreate {
    pub item: String,
    #[serde(default)]
    pub amount: u64,
}

/// Body of `PUT /resources/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUpdate {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub amount: Option<u64>,
}
