//! Raw order line CRUD.
//!
//! These operations edit lines directly and never touch stock or order
//! totals. Orders placed through `place_order` already carry their lines.

use super::require_positive;
use crate::error::{Result, ShopError};
use crate::model::{Order, OrderDetail, Sandwich};
use crate::schema::{OrderDetailCreate, OrderDetailFilter, OrderDetailUpdate};
use crate::storage::Store;
use crate::storage::tables::{
    ORDER_DETAILS, ORDERS, SANDWICHES, fetch, fetch_required, next_id, put, take,
};
use redb::WriteTransaction;

fn require_sandwich(txn: &WriteTransaction, sandwich_id: u64) -> Result<()> {
    let sandwich: Option<Sandwich> = fetch(&txn.open_table(SANDWICHES)?, sandwich_id)?;
    match sandwich {
        Some(_) => Ok(()),
        None => Err(ShopError::NotFound(format!(
            "Sandwich ID {sandwich_id} not found"
        ))),
    }
}

impl Store {
    pub fn create_order_detail(&self, request: OrderDetailCreate) -> Result<OrderDetail> {
        let amount = require_positive(request.amount, "amount")?;

        let txn = self.write()?;
        let detail = {
            let order: Option<Order> = fetch(&txn.open_table(ORDERS)?, request.order_id)?;
            if order.is_none() {
                return Err(ShopError::NotFound(format!(
                    "Order ID {} not found",
                    request.order_id
                )));
            }
            require_sandwich(&txn, request.sandwich_id)?;

            let detail = OrderDetail {
                id: next_id(&txn, ORDER_DETAILS)?,
                order_id: request.order_id,
                sandwich_id: request.sandwich_id,
                amount,
            };
            put(&mut txn.open_table(ORDER_DETAILS)?, &detail)?;
            detail
        };
        txn.commit()?;

        tracing::debug!(id = detail.id, order_id = detail.order_id, "created order detail");
        Ok(detail)
    }

    pub fn list_order_details(&self, filter: &OrderDetailFilter) -> Result<Vec<OrderDetail>> {
        let mut details: Vec<OrderDetail> = self.list_rows()?;
        if let Some(order_id) = filter.order_id {
            details.retain(|detail| detail.order_id == order_id);
        }
        Ok(details)
    }

    pub fn get_order_detail(&self, id: u64) -> Result<OrderDetail> {
        self.get_row(id)
    }

    pub fn update_order_detail(&self, id: u64, request: OrderDetailUpdate) -> Result<OrderDetail> {
        let txn = self.write()?;
        let detail = {
            let mut detail: OrderDetail = fetch_required(&txn.open_table(ORDER_DETAILS)?, id)?;
            if let Some(sandwich_id) = request.sandwich_id {
                require_sandwich(&txn, sandwich_id)?;
                detail.sandwich_id = sandwich_id;
            }
            if let Some(amount) = request.amount {
                detail.amount = require_positive(amount, "amount")?;
            }
            put(&mut txn.open_table(ORDER_DETAILS)?, &detail)?;
            detail
        };
        txn.commit()?;

        tracing::debug!(id, "updated order detail");
        Ok(detail)
    }

    pub fn delete_order_detail(&self, id: u64) -> Result<()> {
        let txn = self.write()?;
        let _: OrderDetail = take(&mut txn.open_table(ORDER_DETAILS)?, id)?;
        txn.commit()?;

        tracing::debug!(id, "deleted order detail");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::error::ShopError;
    use crate::money::Money;
    use crate::schema::{
        OrderCreate, OrderDetailCreate, OrderDetailFilter, OrderDetailUpdate, OrderLine,
        ResourceCreate, SandwichCreate,
    };
    use crate::storage::Store;
    use crate::storage::tests::temp_store;

    /// One sandwich with no recipe and one placed order. Returns both ids.
    fn placed(store: &Store) -> (u64, u64) {
        let sandwich = store
            .create_sandwich(SandwichCreate {
                sandwich_name: String::from("Plain"),
                price: Money::from_cents(300),
                category: None,
                description: None,
                is_available: true,
            })
            .unwrap();
        let order = store
            .place_order(OrderCreate::takeout("Ada", vec![OrderLine::new(sandwich.id, 1)]))
            .unwrap();
        (order.order.id, sandwich.id)
    }

    #[test]
    fn create_requires_existing_order() {
        let (_dir, store) = temp_store();
        let (_, sandwich_id) = placed(&store);
        let err = store
            .create_order_detail(OrderDetailCreate {
                order_id: 42,
                sandwich_id,
                amount: 1,
            })
            .unwrap_err();
        assert!(matches!(err, ShopError::NotFound(_)));
        assert_eq!(err.to_string(), "Order ID 42 not found");
    }

    #[test]
    fn crud_leaves_stock_alone() {
        let (_dir, store) = temp_store();
        let bread = store
            .create_resource(ResourceCreate {
                item: String::from("Bread"),
                amount: 5,
            })
            .unwrap();
        let (order_id, sandwich_id) = placed(&store);

        let detail = store
            .create_order_detail(OrderDetailCreate {
                order_id,
                sandwich_id,
                amount: 4,
            })
            .unwrap();
        let by_order = store
            .list_order_details(&OrderDetailFilter {
                order_id: Some(order_id),
            })
            .unwrap();
        assert_eq!(by_order.len(), 2);

        let updated = store
            .update_order_detail(
                detail.id,
                OrderDetailUpdate {
                    amount: Some(7),
                    ..OrderDetailUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, 7);
        assert_eq!(store.get_resource(bread.id).unwrap().amount, 5);

        store.delete_order_detail(detail.id).unwrap();
        assert!(matches!(
            store.get_order_detail(detail.id),
            Err(ShopError::NotFound(_))
        ));
    }
}
