//! Table definitions and row codec helpers.

use crate::error::{Result, ShopError};
use crate::model::{
    Order, OrderDetail, Payment, PromotionalCode, Recipe, Resource, Review, Sandwich,
};
use redb::{ReadableTable, Table, TableDefinition, TableHandle, WriteTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A table of postcard-encoded rows keyed by id.
pub type RowTable = TableDefinition<'static, u64, &'static [u8]>;

/// A unique text index: name -> row id.
pub type NameIndex = TableDefinition<'static, &'static str, u64>;

// =============================================================================
// TABLES
// =============================================================================

pub(crate) const RESOURCES: RowTable = TableDefinition::new("resources");
pub(crate) const SANDWICHES: RowTable = TableDefinition::new("sandwiches");
pub(crate) const RECIPES: RowTable = TableDefinition::new("recipes");
pub(crate) const ORDERS: RowTable = TableDefinition::new("orders");
pub(crate) const ORDER_DETAILS: RowTable = TableDefinition::new("order_details");
pub(crate) const PAYMENTS: RowTable = TableDefinition::new("payments");
pub(crate) const PROMO_CODES: RowTable = TableDefinition::new("promotional_codes");
pub(crate) const REVIEWS: RowTable = TableDefinition::new("reviews");

/// Next id per row table.
pub(crate) const SEQUENCES: NameIndex = TableDefinition::new("sequences");

pub(crate) const RESOURCE_ITEMS: NameIndex = TableDefinition::new("resource_items");
pub(crate) const SANDWICH_NAMES: NameIndex = TableDefinition::new("sandwich_names");
pub(crate) const PROMO_CODE_NAMES: NameIndex = TableDefinition::new("promo_code_names");
pub(crate) const TRACKING_NUMBERS: NameIndex = TableDefinition::new("tracking_numbers");

/// order id -> payment id, enforcing one payment per order.
pub(crate) const PAYMENT_ORDERS: TableDefinition<'static, u64, u64> =
    TableDefinition::new("payment_orders");

// =============================================================================
// ROW TRAIT
// =============================================================================

/// A persistence row stored in its own table.
pub trait Row: Serialize + DeserializeOwned {
    /// The table holding rows of this type.
    const TABLE: RowTable;

    /// The row's primary key.
    fn id(&self) -> u64;
}

macro_rules! row {
    ($ty:ty => $table:ident) => {
        impl Row for $ty {
            const TABLE: RowTable = $table;

            fn id(&self) -> u64 {
                self.id
            }
        }
    };
}

row!(Resource => RESOURCES);
row!(Sandwich => SANDWICHES);
row!(Recipe => RECIPES);
row!(Order => ORDERS);
row!(OrderDetail => ORDER_DETAILS);
row!(Payment => PAYMENTS);
row!(PromotionalCode => PROMO_CODES);
row!(Review => REVIEWS);

// =============================================================================
// CODEC HELPERS
// =============================================================================

/// Decode one row, if present.
pub(crate) fn fetch<R: Row>(
    table: &impl ReadableTable<u64, &'static [u8]>,
    id: u64,
) -> Result<Option<R>> {
    match table.get(id)? {
        Some(bytes) => Ok(Some(postcard::from_bytes(bytes.value())?)),
        None => Ok(None),
    }
}

/// Decode one row or fail with "Id not found!".
pub(crate) fn fetch_required<R: Row>(
    table: &impl ReadableTable<u64, &'static [u8]>,
    id: u64,
) -> Result<R> {
    fetch(table, id)?.ok_or_else(ShopError::missing_id)
}

/// Decode every row in id order.
pub(crate) fn fetch_all<R: Row>(table: &impl ReadableTable<u64, &'static [u8]>) -> Result<Vec<R>> {
    let mut rows = Vec::new();
    for entry in table.iter()? {
        let (_, bytes) = entry?;
        rows.push(postcard::from_bytes(bytes.value())?);
    }
    Ok(rows)
}

/// Encode and insert (or overwrite) a row.
pub(crate) fn put<R: Row>(table: &mut Table<'_, u64, &'static [u8]>, row: &R) -> Result<()> {
    let bytes = postcard::to_allocvec(row)?;
    table.insert(row.id(), bytes.as_slice())?;
    Ok(())
}

/// Allocate the next id for a row table, starting at 1.
pub(crate) fn next_id(txn: &WriteTransaction, table: RowTable) -> Result<u64> {
    let mut sequences = txn.open_table(SEQUENCES)?;
    let name = table.name();
    let current = sequences.get(name)?.map(|guard| guard.value()).unwrap_or(0);
    let next = current.saturating_add(1);
    sequences.insert(name, next)?;
    Ok(next)
}

/// Point `name` at `id` in a unique index.
///
/// Fails with `Conflict` when another row already owns the name.
pub(crate) fn claim_name(
    index: &mut Table<'_, &'static str, u64>,
    name: &str,
    id: u64,
    what: &str,
) -> Result<()> {
    let owner = index.get(name)?.map(|guard| guard.value());
    match owner {
        Some(owner) if owner != id => Err(ShopError::Conflict(format!(
            "{what} '{name}' already exists"
        ))),
        _ => {
            index.insert(name, id)?;
            Ok(())
        }
    }
}

/// Look up a row id in a unique index.
pub(crate) fn lookup_name(
    index: &impl ReadableTable<&'static str, u64>,
    name: &str,
) -> Result<Option<u64>> {
    Ok(index.get(name)?.map(|guard| guard.value()))
}

/// Remove a row and return it, failing with "Id not found!".
pub(crate) fn take<R: Row>(table: &mut Table<'_, u64, &'static [u8]>, id: u64) -> Result<R> {
    let removed = table.remove(id)?;
    match removed {
        Some(bytes) => Ok(postcard::from_bytes(bytes.value())?),
        None => Err(ShopError::missing_id()),
    }
}
