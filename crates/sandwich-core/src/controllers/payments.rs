//! Payments. An order has at most one.

use crate::error::{Result, ShopError};
use crate::model::{Order, Payment};
use crate::schema::{PaymentCreate, PaymentFilter, PaymentUpdate};
use crate::storage::Store;
use crate::storage::tables::{
    ORDERS, PAYMENT_ORDERS, PAYMENTS, fetch, fetch_required, next_id, put, take,
};
use chrono::Utc;
use redb::ReadableTable;

impl Store {
    /// Record the payment for an order.
    ///
    /// Fails with `Conflict` if the order already has one.
    pub fn create_payment(&self, request: PaymentCreate) -> Result<Payment> {
        if request.amount.cents() < 0 {
            return Err(ShopError::Validation(String::from(
                "amount must not be negative",
            )));
        }

        let txn = self.write()?;
        let payment = {
            let order: Option<Order> = fetch(&txn.open_table(ORDERS)?, request.order_id)?;
            if order.is_none() {
                return Err(ShopError::NotFound(format!(
                    "Order ID {} not found",
                    request.order_id
                )));
            }

            let mut by_order = txn.open_table(PAYMENT_ORDERS)?;
            if by_order.get(request.order_id)?.is_some() {
                return Err(ShopError::Conflict(format!(
                    "Payment for order ID {} already exists",
                    request.order_id
                )));
            }

            let payment = Payment {
                id: next_id(&txn, PAYMENTS)?,
                order_id: request.order_id,
                amount: request.amount,
                payment_method: request.payment_method,
                payment_status: request.payment_status,
                payment_date: Utc::now(),
            };
            by_order.insert(payment.order_id, payment.id)?;
            put(&mut txn.open_table(PAYMENTS)?, &payment)?;
            payment
        };
        txn.commit()?;

        tracing::debug!(
            id = payment.id,
            order_id = payment.order_id,
            method = %payment.payment_method,
            "created payment"
        );
        Ok(payment)
    }

    pub fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>> {
        let mut payments: Vec<Payment> = self.list_rows()?;
        if let Some(status) = filter.payment_status {
            payments.retain(|payment| payment.payment_status == status);
        }
        Ok(payments)
    }

    pub fn get_payment(&self, id: u64) -> Result<Payment> {
        self.get_row(id)
    }

    pub fn get_payment_by_order(&self, order_id: u64) -> Result<Payment> {
        let txn = self.read()?;
        let id = txn
            .open_table(PAYMENT_ORDERS)?
            .get(order_id)?
            .map(|guard| guard.value());
        let not_found = || ShopError::NotFound(String::from("Payment not found for this order"));
        let id = id.ok_or_else(not_found)?;
        fetch(&txn.open_table(PAYMENTS)?, id)?.ok_or_else(not_found)
    }

    pub fn update_payment(&self, id: u64, request: PaymentUpdate) -> Result<Payment> {
        let txn = self.write()?;
        let payment = {
            let mut table = txn.open_table(PAYMENTS)?;
            let mut payment: Payment = fetch_required(&table, id)?;
            if let Some(status) = request.payment_status {
                payment.payment_status = status;
            }
            put(&mut table, &payment)?;
            payment
        };
        txn.commit()?;

        tracing::debug!(id, status = %payment.payment_status, "updated payment");
        Ok(payment)
    }

    pub fn delete_payment(&self, id: u64) -> Result<()> {
        let txn = self.write()?;
        {
            let payment: Payment = take(&mut txn.open_table(PAYMENTS)?, id)?;
            txn.open_table(PAYMENT_ORDERS)?.remove(payment.order_id)?;
        }
        txn.commit()?;

        tracing::debug!(id, "deleted payment");
        Ok(())
    }
}
