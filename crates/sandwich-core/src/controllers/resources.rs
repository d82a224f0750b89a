//! Ingredient inventory.

use super::require_text;
use crate::error::{Result, ShopError};
use crate::model::{Recipe, Resource};
use crate::schema::{ResourceCreate, ResourceUpdate};
use crate::storage::Store;
use crate::storage::tables::{
    RECIPES, RESOURCES, RESOURCE_ITEMS, claim_name, fetch_all, fetch_required, next_id, put, take,
};

impl Store {
    pub fn create_resource(&self, request: ResourceCreate) -> Result<Resource> {
        let item = require_text(&request.item, "item")?;

        let txn = self.write()?;
        let resource = {
            let id = next_id(&txn, RESOURCES)?;
            let resource = Resource {
                id,
                item,
                amount: request.amount,
            };
            claim_name(&mut txn.open_table(RESOURCE_ITEMS)?, &resource.item, id, "Resource")?;
            put(&mut txn.open_table(RESOURCES)?, &resource)?;
            resource
        };
        txn.commit()?;

        tracing::debug!(id = resource.id, item = %resource.item, "created resource");
        Ok(resource)
    }

    pub fn list_resources(&self) -> Result<Vec<Resource>> {
        self.list_rows()
    }

    pub fn get_resource(&self, id: u64) -> Result<Resource> {
        self.get_row(id)
    }

    pub fn update_resource(&self, id: u64, request: ResourceUpdate) -> Result<Resource> {
        let txn = self.write()?;
        let resource = {
            let mut table = txn.open_table(RESOURCES)?;
            let mut resource: Resource = fetch_required(&table, id)?;

            if let Some(item) = request.item {
                let item = require_text(&item, "item")?;
                if item != resource.item {
                    let mut index = txn.open_table(RESOURCE_ITEMS)?;
                    claim_name(&mut index, &item, id, "Resource")?;
                    index.remove(resource.item.as_str())?;
                    resource.item = item;
                }
            }
            if let Some(amount) = request.amount {
                resource.amount = amount;
            }

            put(&mut table, &resource)?;
            resource
        };
        txn.commit()?;

        tracing::debug!(id, "updated resource");
        Ok(resource)
    }

    /// Delete a resource that no recipe uses.
    pub fn delete_resource(&self, id: u64) -> Result<()> {
        let txn = self.write()?;
        {
            let recipes: Vec<Recipe> = fetch_all(&txn.open_table(RECIPES)?)?;
            if recipes.iter().any(|recipe| recipe.resource_id == id) {
                return Err(ShopError::Conflict(format!(
                    "Resource ID {id} is used by a recipe"
                )));
            }

            let resource: Resource = take(&mut txn.open_table(RESOURCES)?, id)?;
            txn.open_table(RESOURCE_ITEMS)?
                .remove(resource.item.as_str())?;
        }
        txn.commit()?;

        tracing::debug!(id, "deleted resource");
        Ok(())
    }
}
