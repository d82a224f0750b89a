use crate::model::{PaymentMethod, PaymentStatus};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub order_id: u64,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

/// Body of `PUT /payments/{id}`. Only the status can change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// Query of `GET /payments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentFilter {
    pub payment_status: Option<PaymentStatus>,
}
