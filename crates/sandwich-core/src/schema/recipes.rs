use serde::{Deserialize, Serialize};

/// Body of `POST /recipes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub sandwich_id: u64,
    pub resource_id: u64,
    pub amount: u64,
}

/// Body of `PUT /recipes/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    #[serde(default)]
    pub sandwich_id: Option<u64>,
    #[serde(default)]
    pub resource_id: Option<u64>,
    #[serde(default)]
    pub amount: Option<u64>,
}

/// Query of `GET /recipes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecipeFilter {
    pub sandwich_id: Option<u64>,
}
