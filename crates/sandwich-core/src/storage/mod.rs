//! # Storage Module
//!
//! Disk-backed storage for the shop using redb.
//!
//! Uses redb embedded database for:
//! - ACID transactions (every mutating operation is one write transaction)
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//!
//! The single-writer guarantee is what keeps order placement from
//! overselling: the stock check and the deduction share one transaction.

pub(crate) mod tables;

use crate::error::Result;
use redb::{Database, ReadTransaction, ReadableDatabase, ReadableTableMetadata, WriteTransaction};
use serde::Serialize;
use std::path::Path;
use tables::{
    NameIndex, RowTable, ORDERS, ORDER_DETAILS, PAYMENTS, PAYMENT_ORDERS, PROMO_CODES,
    PROMO_CODE_NAMES, RECIPES, RESOURCES, RESOURCE_ITEMS, REVIEWS, Row, SANDWICHES,
    SANDWICH_NAMES, SEQUENCES, TRACKING_NUMBERS,
};

const ROW_TABLES: [RowTable; 8] = [
    RESOURCES,
    SANDWICHES,
    RECIPES,
    ORDERS,
    ORDER_DETAILS,
    PAYMENTS,
    PROMO_CODES,
    REVIEWS,
];

const NAME_INDEXES: [NameIndex; 5] = [
    SEQUENCES,
    RESOURCE_ITEMS,
    SANDWICH_NAMES,
    PROMO_CODE_NAMES,
    TRACKING_NUMBERS,
];

// =============================================================================
// STORE
// =============================================================================

/// The shop database.
///
/// Every controller is implemented as a method on `Store`; see the
/// `controllers` module. `Store` is `Send + Sync` and can be shared
/// behind an `Arc`.
pub struct Store {
    db: Database,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Open the database at `path`, creating the file and tables if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::create(path.as_ref())?;
        let store = Self { db };
        store.ensure_tables()?;
        tracing::debug!(path = %path.as_ref().display(), "opened store");
        Ok(store)
    }

    /// Create every table so read transactions never see a missing one.
    fn ensure_tables(&self) -> Result<()> {
        let txn = self.db.begin_write()?;
        for table in ROW_TABLES {
            txn.open_table(table)?;
        }
        for index in NAME_INDEXES {
            txn.open_table(index)?;
        }
        txn.open_table(PAYMENT_ORDERS)?;
        txn.commit()?;
        Ok(())
    }

    pub(crate) fn read(&self) -> Result<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    pub(crate) fn write(&self) -> Result<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Fetch one row by id, failing with "Id not found!".
    pub(crate) fn get_row<R: Row>(&self, id: u64) -> Result<R> {
        let txn = self.read()?;
        let table = txn.open_table(R::TABLE)?;
        tables::fetch_required(&table, id)
    }

    /// Fetch every row of a table in id order.
    pub(crate) fn list_rows<R: Row>(&self) -> Result<Vec<R>> {
        let txn = self.read()?;
        let table = txn.open_table(R::TABLE)?;
        tables::fetch_all(&table)
    }

    /// Row counts for every entity table.
    pub fn status(&self) -> Result<StoreStatus> {
        let txn = self.read()?;
        let count = |table: RowTable| -> Result<u64> { Ok(txn.open_table(table)?.len()?) };
        Ok(StoreStatus {
            resources: count(RESOURCES)?,
            sandwiches: count(SANDWICHES)?,
            recipes: count(RECIPES)?,
            orders: count(ORDERS)?,
            order_details: count(ORDER_DETAILS)?,
            payments: count(PAYMENTS)?,
            promotional_codes: count(PROMO_CODES)?,
            reviews: count(REVIEWS)?,
        })
    }
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub resources: u64,
    pub sandwiches: u64,
    pub recipes: u64,
    pub orders: u64,
    pub order_details: u64,
    pub payments: u64,
    pub promotional_codes: u64,
    pub reviews: u64,
}

impl StoreStatus {
    /// Total rows across all tables.
    #[must_use]
    pub fn total(&self) -> u64 {
        [
            self.resources,
            self.sandwiches,
            self.recipes,
            self.orders,
            self.order_details,
            self.payments,
            self.promotional_codes,
            self.reviews,
        ]
        .iter()
        .sum()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Open a store in a fresh temp directory. Keep the `TempDir` alive.
    pub(crate) fn temp_store() -> (TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("shop.redb")).unwrap();
        (dir, store)
    }

    #[test]
    fn fresh_store_is_empty() {
        let (_dir, store) = temp_store();
        let status = store.status().unwrap();
        assert_eq!(status, StoreStatus::default());
        assert_eq!(status.total(), 0);
    }

    #[test]
    fn reopen_keeps_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.redb");
        drop(Store::open(&path).unwrap());
        let store = Store::open(&path).unwrap();
        assert!(store.status().is_ok());
    }
}
