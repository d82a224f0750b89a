//! Discount codes.

use super::require_text;
use crate::error::{Result, ShopError};
use crate::model::{Order, PromotionalCode};
use crate::schema::{PromotionalCodeCreate, PromotionalCodeFilter, PromotionalCodeUpdate};
use crate::storage::Store;
use crate::storage::tables::{
    ORDERS, PROMO_CODE_NAMES, PROMO_CODES, claim_name, fetch, fetch_all, fetch_required,
    lookup_name, next_id, put, take,
};
use chrono::{DateTime, Utc};

impl Store {
    pub fn create_promotional_code(&self, request: PromotionalCodeCreate) -> Result<PromotionalCode> {
        let code = require_text(&request.code, "code")?;

        let txn = self.write()?;
        let promo = {
            let id = next_id(&txn, PROMO_CODES)?;
            let promo = PromotionalCode {
                id,
                code,
                discount_percent: request.discount_percent,
                expiration_date: request.expiration_date,
                is_active: request.is_active,
                created_at: Utc::now(),
            };
            claim_name(
                &mut txn.open_table(PROMO_CODE_NAMES)?,
                &promo.code,
                id,
                "Promotional code",
            )?;
            put(&mut txn.open_table(PROMO_CODES)?, &promo)?;
            promo
        };
        txn.commit()?;

        tracing::debug!(id = promo.id, code = %promo.code, "created promotional code");
        Ok(promo)
    }

    pub fn list_promotional_codes(
        &self,
        filter: &PromotionalCodeFilter,
    ) -> Result<Vec<PromotionalCode>> {
        let mut promos: Vec<PromotionalCode> = self.list_rows()?;
        if let Some(active) = filter.is_active {
            promos.retain(|promo| promo.is_active == active);
        }
        Ok(promos)
    }

    pub fn get_promotional_code(&self, id: u64) -> Result<PromotionalCode> {
        self.get_row(id)
    }

    /// Look up a code a customer could apply right now.
    pub fn find_redeemable_code(&self, code: &str) -> Result<PromotionalCode> {
        self.find_redeemable_code_at(code, Utc::now())
    }

    /// Like [`Store::find_redeemable_code`], judging expiry against `now`.
    pub fn find_redeemable_code_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<PromotionalCode> {
        let txn = self.read()?;
        let promo: Option<PromotionalCode> =
            match lookup_name(&txn.open_table(PROMO_CODE_NAMES)?, code)? {
                Some(id) => fetch(&txn.open_table(PROMO_CODES)?, id)?,
                None => None,
            };
        promo
            .filter(|promo| promo.is_redeemable(now))
            .ok_or_else(|| {
                ShopError::NotFound(String::from("Promotional code not found or expired"))
            })
    }

    pub fn update_promotional_code(
        &self,
        id: u64,
        request: PromotionalCodeUpdate,
    ) -> Result<PromotionalCode> {
        let txn = self.write()?;
        let promo = {
            let mut table = txn.open_table(PROMO_CODES)?;
            let mut promo: PromotionalCode = fetch_required(&table, id)?;

            if let Some(code) = request.code {
                let code = require_text(&code, "code")?;
                if code != promo.code {
                    let mut index = txn.open_table(PROMO_CODE_NAMES)?;
                    claim_name(&mut index, &code, id, "Promotional code")?;
                    index.remove(promo.code.as_str())?;
                    promo.code = code;
                }
            }
            if let Some(percent) = request.discount_percent {
                promo.discount_percent = percent;
            }
            if let Some(expiration) = request.expiration_date {
                promo.expiration_date = expiration;
            }
            if let Some(active) = request.is_active {
                promo.is_active = active;
            }

            put(&mut table, &promo)?;
            promo
        };
        txn.commit()?;

        tracing::debug!(id, "updated promotional code");
        Ok(promo)
    }

    /// Delete a code no order has used.
    pub fn delete_promotional_code(&self, id: u64) -> Result<()> {
        let txn = self.write()?;
        {
            let orders: Vec<Order> = fetch_all(&txn.open_table(ORDERS)?)?;
            if orders.iter().any(|order| order.promo_code_id == Some(id)) {
                return Err(ShopError::Conflict(format!(
                    "Promotional code ID {id} is referenced by an order"
                )));
            }

            let promo: PromotionalCode = take(&mut txn.open_table(PROMO_CODES)?, id)?;
            txn.open_table(PROMO_CODE_NAMES)?
                .remove(promo.code.as_str())?;
        }
        txn.commit()?;

        tracing::debug!(id, "deleted promotional code");
        Ok(())
    }
}
