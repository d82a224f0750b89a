//! Ingredient-to-sandwich mappings.

use super::require_positive;
use crate::error::{Result, ShopError};
use crate::model::{Recipe, Resource, Sandwich};
use crate::schema::{RecipeCreate, RecipeFilter, RecipeUpdate};
use crate::storage::Store;
use crate::storage::tables::{
    RECIPES, RESOURCES, SANDWICHES, fetch, fetch_required, next_id, put, take,
};
use redb::WriteTransaction;

/// Fail unless both ends of a recipe exist.
fn check_references(txn: &WriteTransaction, sandwich_id: u64, resource_id: u64) -> Result<()> {
    let sandwich: Option<Sandwich> = fetch(&txn.open_table(SANDWICHES)?, sandwich_id)?;
    if sandwich.is_none() {
        return Err(ShopError::NotFound(format!(
            "Sandwich ID {sandwich_id} not found"
        )));
    }
    let resource: Option<Resource> = fetch(&txn.open_table(RESOURCES)?, resource_id)?;
    if resource.is_none() {
        return Err(ShopError::NotFound(format!(
            "Resource ID {resource_id} not found"
        )));
    }
    Ok(())
}

impl Store {
    pub fn create_recipe(&self, request: RecipeCreate) -> Result<Recipe> {
        let amount = require_positive(request.amount, "amount")?;

        let txn = self.write()?;
        let recipe = {
            check_references(&txn, request.sandwich_id, request.resource_id)?;
            let recipe = Recipe {
                id: next_id(&txn, RECIPES)?,
                sandwich_id: request.sandwich_id,
                resource_id: request.resource_id,
                amount,
            };
            put(&mut txn.open_table(RECIPES)?, &recipe)?;
            recipe
        };
        txn.commit()?;

        tracing::debug!(
            id = recipe.id,
            sandwich_id = recipe.sandwich_id,
            resource_id = recipe.resource_id,
            "created recipe"
        );
        Ok(recipe)
    }

    pub fn list_recipes(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self.list_rows()?;
        if let Some(sandwich_id) = filter.sandwich_id {
            recipes.retain(|recipe| recipe.sandwich_id == sandwich_id);
        }
        Ok(recipes)
    }

    pub fn get_recipe(&self, id: u64) -> Result<Recipe> {
        self.get_row(id)
    }

    pub fn update_recipe(&self, id: u64, request: RecipeUpdate) -> Result<Recipe> {
        let txn = self.write()?;
        let recipe = {
            let mut recipe: Recipe = fetch_required(&txn.open_table(RECIPES)?, id)?;
            if let Some(sandwich_id) = request.sandwich_id {
                recipe.sandwich_id = sandwich_id;
            }
            if let Some(resource_id) = request.resource_id {
                recipe.resource_id = resource_id;
            }
            if let Some(amount) = request.amount {
                recipe.amount = require_positive(amount, "amount")?;
            }
            check_references(&txn, recipe.sandwich_id, recipe.resource_id)?;
            put(&mut txn.open_table(RECIPES)?, &recipe)?;
            recipe
        };
        txn.commit()?;

        tracing::debug!(id, "updated recipe");
        Ok(recipe)
    }

    pub fn delete_recipe(&self, id: u64) -> Result<()> {
        let txn = self.write()?;
        let _: Recipe = take(&mut txn.open_table(RECIPES)?, id)?;
        txn.commit()?;

        tracing::debug!(id, "deleted recipe");
        Ok(())
    }
}
