//! Orders and the order placement workflow.

use super::{optional_text, require_positive, require_text};
use crate::error::{Result, ShopError};
use crate::model::{
    Order, OrderDetail, OrderStatus, PromotionalCode, Recipe, Resource, Review, Sandwich,
};
use crate::money::Money;
use crate::schema::{DateRange, OrderCreate, OrderResponse, OrderUpdate};
use crate::stock;
use crate::storage::Store;
use crate::storage::tables::{
    ORDER_DETAILS, ORDERS, PAYMENT_ORDERS, PROMO_CODE_NAMES, PROMO_CODES, RECIPES, RESOURCES,
    REVIEWS, SANDWICHES, TRACKING_NUMBERS, fetch, fetch_all, fetch_required, lookup_name,
    next_id, put, take,
};
use chrono::{DateTime, Utc};
use redb::{ReadableTable, WriteTransaction};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Attempts at drawing an unused tracking number before giving up.
const TRACKING_ATTEMPTS: usize = 16;

// =============================================================================
// HELPERS
// =============================================================================

/// A fresh `TRK-XXXXXXXX` candidate.
fn tracking_candidate() -> String {
    let hex: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect();
    format!("TRK-{}", hex.to_uppercase())
}

/// Draw a tracking number no other order uses and index it to `order_id`.
fn claim_tracking_number(txn: &WriteTransaction, order_id: u64) -> Result<String> {
    let mut index = txn.open_table(TRACKING_NUMBERS)?;
    for _ in 0..TRACKING_ATTEMPTS {
        let candidate = tracking_candidate();
        if lookup_name(&index, &candidate)?.is_none() {
            index.insert(candidate.as_str(), order_id)?;
            return Ok(candidate);
        }
        tracing::debug!(%candidate, "tracking number collision");
    }
    Err(ShopError::Conflict(String::from(
        "Could not allocate a unique tracking number",
    )))
}

/// Resolve a promo code for an order, refusing unknown, inactive and
/// expired codes.
fn redeem_promo(txn: &WriteTransaction, code: &str, now: DateTime<Utc>) -> Result<PromotionalCode> {
    let invalid = || ShopError::Validation(String::from("Invalid promotional code"));

    let id = lookup_name(&txn.open_table(PROMO_CODE_NAMES)?, code)?.ok_or_else(invalid)?;
    let promo: PromotionalCode = fetch(&txn.open_table(PROMO_CODES)?, id)?.ok_or_else(invalid)?;

    if !promo.is_active {
        return Err(ShopError::Validation(String::from(
            "Promotional code is not active",
        )));
    }
    if promo.is_expired(now) {
        return Err(ShopError::Validation(String::from(
            "Promotional code has expired",
        )));
    }
    Ok(promo)
}

/// Group order lines by order id.
fn details_by_order(details: Vec<OrderDetail>) -> BTreeMap<u64, Vec<OrderDetail>> {
    let mut grouped: BTreeMap<u64, Vec<OrderDetail>> = BTreeMap::new();
    for detail in details {
        grouped.entry(detail.order_id).or_default().push(detail);
    }
    grouped
}

fn details_of(
    table: &impl ReadableTable<u64, &'static [u8]>,
    order_id: u64,
) -> Result<Vec<OrderDetail>> {
    let mut details: Vec<OrderDetail> = fetch_all(table)?;
    details.retain(|detail| detail.order_id == order_id);
    Ok(details)
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl Store {
    /// Place an order as of now. See [`Store::place_order_at`].
    pub fn place_order(&self, request: OrderCreate) -> Result<OrderResponse> {
        self.place_order_at(request, Utc::now())
    }

    /// Place an order, judging promo expiry against `now`.
    ///
    /// Validation, the stock check, the stock deduction and the inserts all
    /// share one write transaction. Any failure leaves the store unchanged.
    pub fn place_order_at(&self, request: OrderCreate, now: DateTime<Utc>) -> Result<OrderResponse> {
        let customer_name = require_text(&request.customer_name, "customer_name")?;
        if request.order_details.is_empty() {
            return Err(ShopError::Validation(String::from(
                "Order must contain at least one item",
            )));
        }
        for line in &request.order_details {
            require_positive(line.amount, "amount")?;
        }

        let txn = self.write()?;
        let response = {
            let promo = match request.promo_code.as_deref() {
                Some(code) => match redeem_promo(&txn, code, now) {
                    Ok(promo) => Some(promo),
                    Err(err) => {
                        tracing::warn!(code, reason = %err, "order refused: promo code");
                        return Err(err);
                    }
                },
                None => None,
            };

            let mut menu: Vec<Sandwich> = Vec::with_capacity(request.order_details.len());
            {
                let sandwiches = txn.open_table(SANDWICHES)?;
                for line in &request.order_details {
                    let sandwich: Sandwich =
                        fetch(&sandwiches, line.sandwich_id)?.ok_or_else(|| {
                            ShopError::NotFound(format!(
                                "Sandwich ID {} not found",
                                line.sandwich_id
                            ))
                        })?;
                    if !sandwich.is_available {
                        return Err(ShopError::Validation(format!(
                            "Sandwich '{}' is not available",
                            sandwich.sandwich_name
                        )));
                    }
                    menu.push(sandwich);
                }
            }

            let recipes: Vec<Recipe> = fetch_all(&txn.open_table(RECIPES)?)?;
            let per_line: Vec<Vec<Recipe>> = request
                .order_details
                .iter()
                .map(|line| {
                    recipes
                        .iter()
                        .filter(|recipe| recipe.sandwich_id == line.sandwich_id)
                        .cloned()
                        .collect()
                })
                .collect();
            let lines: Vec<(&[Recipe], u64)> = per_line
                .iter()
                .zip(&request.order_details)
                .map(|(recipes, line)| (recipes.as_slice(), line.amount))
                .collect();

            let mut resource_table = txn.open_table(RESOURCES)?;
            let resources: BTreeMap<u64, Resource> = fetch_all::<Resource>(&resource_table)?
                .into_iter()
                .map(|resource| (resource.id, resource))
                .collect();

            let shortages = stock::order_shortages(&lines, &resources);
            if !shortages.is_empty() {
                tracing::warn!(
                    customer = %customer_name,
                    ?shortages,
                    "order refused: insufficient stock"
                );
                return Err(ShopError::InsufficientStock(shortages));
            }

            let subtotal = menu
                .iter()
                .zip(&request.order_details)
                .map(|(sandwich, line)| sandwich.price.checked_times(line.amount))
                .try_fold(Money::ZERO, |total, line| total.checked_add(line?))
                .ok_or_else(|| ShopError::Validation(String::from("order total is too large")))?;
            let total_price = match &promo {
                Some(promo) => subtotal.discounted(promo.discount_percent),
                None => subtotal,
            };

            for (resource_id, used) in stock::total_demand(lines.iter().copied()) {
                if let Some(resource) = resources.get(&resource_id) {
                    let remaining = Resource {
                        amount: resource.amount.saturating_sub(used),
                        ..resource.clone()
                    };
                    put(&mut resource_table, &remaining)?;
                }
            }
            drop(resource_table);

            let id = next_id(&txn, ORDERS)?;
            let order = Order {
                id,
                customer_name,
                description: optional_text(request.description),
                order_date: now,
                tracking_number: claim_tracking_number(&txn, id)?,
                order_type: request.order_type,
                order_status: OrderStatus::Pending,
                total_price,
                promo_code_id: promo.as_ref().map(|promo| promo.id),
            };
            put(&mut txn.open_table(ORDERS)?, &order)?;

            let mut order_details = Vec::with_capacity(request.order_details.len());
            {
                let mut table = txn.open_table(ORDER_DETAILS)?;
                for line in &request.order_details {
                    let detail = OrderDetail {
                        id: next_id(&txn, ORDER_DETAILS)?,
                        order_id: id,
                        sandwich_id: line.sandwich_id,
                        amount: line.amount,
                    };
                    put(&mut table, &detail)?;
                    order_details.push(detail);
                }
            }

            OrderResponse {
                order,
                order_details,
            }
        };
        txn.commit()?;

        tracing::info!(
            id = response.order.id,
            tracking_number = %response.order.tracking_number,
            total = %response.order.total_price,
            lines = response.order_details.len(),
            "order placed"
        );
        Ok(response)
    }

    /// Orders inside `range`, newest first.
    pub fn list_orders(&self, range: &DateRange) -> Result<Vec<OrderResponse>> {
        let txn = self.read()?;
        let mut orders: Vec<Order> = fetch_all(&txn.open_table(ORDERS)?)?;
        let mut details = details_by_order(fetch_all(&txn.open_table(ORDER_DETAILS)?)?);

        orders.retain(|order| range.contains(order.order_date));
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));

        Ok(orders
            .into_iter()
            .map(|order| OrderResponse {
                order_details: details.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }

    pub fn get_order(&self, id: u64) -> Result<OrderResponse> {
        let txn = self.read()?;
        let order: Order = fetch_required(&txn.open_table(ORDERS)?, id)?;
        let order_details = details_of(&txn.open_table(ORDER_DETAILS)?, id)?;
        Ok(OrderResponse {
            order,
            order_details,
        })
    }

    pub fn get_order_by_tracking(&self, tracking_number: &str) -> Result<OrderResponse> {
        let id = {
            let txn = self.read()?;
            lookup_name(&txn.open_table(TRACKING_NUMBERS)?, tracking_number)?
        };
        match id {
            Some(id) => self.get_order(id),
            None => Err(ShopError::NotFound(String::from(
                "Tracking number not found!",
            ))),
        }
    }

    pub fn update_order(&self, id: u64, request: OrderUpdate) -> Result<OrderResponse> {
        let txn = self.write()?;
        let response = {
            let mut table = txn.open_table(ORDERS)?;
            let mut order: Order = fetch_required(&table, id)?;

            if let Some(name) = request.customer_name {
                order.customer_name = require_text(&name, "customer_name")?;
            }
            if let Some(description) = request.description {
                order.description = optional_text(description);
            }
            if let Some(order_type) = request.order_type {
                order.order_type = order_type;
            }
            if let Some(status) = request.order_status {
                order.order_status = status;
            }
            put(&mut table, &order)?;

            OrderResponse {
                order_details: details_of(&txn.open_table(ORDER_DETAILS)?, id)?,
                order,
            }
        };
        txn.commit()?;

        tracing::debug!(id, status = %response.order.order_status, "updated order");
        Ok(response)
    }

    /// Delete an order with its lines and reviews.
    ///
    /// Refused while a payment exists for the order. Consumed stock is not
    /// returned.
    pub fn delete_order(&self, id: u64) -> Result<()> {
        let txn = self.write()?;
        {
            if txn.open_table(PAYMENT_ORDERS)?.get(id)?.is_some() {
                return Err(ShopError::Conflict(format!(
                    "Order ID {id} has a payment and cannot be deleted"
                )));
            }

            let order: Order = take(&mut txn.open_table(ORDERS)?, id)?;
            txn.open_table(TRACKING_NUMBERS)?
                .remove(order.tracking_number.as_str())?;

            let mut details = txn.open_table(ORDER_DETAILS)?;
            for detail in details_of(&details, id)? {
                details.remove(detail.id)?;
            }

            let mut reviews = txn.open_table(REVIEWS)?;
            let owned: Vec<Review> = fetch_all(&reviews)?;
            for review in owned.iter().filter(|review| review.order_id == id) {
                reviews.remove(review.id)?;
            }
        }
        txn.commit()?;

        tracing::debug!(id, "deleted order");
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
