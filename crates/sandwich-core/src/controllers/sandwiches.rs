//! Menu items.

use super::{optional_text, require_text};
use crate::error::{Result, ShopError};
use crate::model::{OrderDetail, Recipe, Review, Sandwich};
use crate::schema::{SandwichCreate, SandwichFilter, SandwichUpdate};
use crate::storage::Store;
use crate::storage::tables::{
    ORDER_DETAILS, RECIPES, REVIEWS, SANDWICHES, SANDWICH_NAMES, claim_name, fetch_all,
    fetch_required, next_id, put, take,
};

impl Store {
    pub fn create_sandwich(&self, request: SandwichCreate) -> Result<Sandwich> {
        let sandwich_name = require_text(&request.sandwich_name, "sandwich_name")?;

        let txn = self.write()?;
        let sandwich = {
            let id = next_id(&txn, SANDWICHES)?;
            let sandwich = Sandwich {
                id,
                sandwich_name,
                price: request.price,
                category: optional_text(request.category),
                description: optional_text(request.description),
                is_available: request.is_available,
            };
            claim_name(
                &mut txn.open_table(SANDWICH_NAMES)?,
                &sandwich.sandwich_name,
                id,
                "Sandwich",
            )?;
            put(&mut txn.open_table(SANDWICHES)?, &sandwich)?;
            sandwich
        };
        txn.commit()?;

        tracing::debug!(id = sandwich.id, name = %sandwich.sandwich_name, "created sandwich");
        Ok(sandwich)
    }

    /// List the menu, optionally narrowed by category and availability.
    pub fn list_sandwiches(&self, filter: &SandwichFilter) -> Result<Vec<Sandwich>> {
        let mut sandwiches: Vec<Sandwich> = self.list_rows()?;
        sandwiches.retain(|sandwich| {
            filter
                .category
                .as_deref()
                .is_none_or(|category| sandwich.category.as_deref() == Some(category))
                && filter
                    .is_available
                    .is_none_or(|available| sandwich.is_available == available)
        });
        Ok(sandwiches)
    }

    pub fn get_sandwich(&self, id: u64) -> Result<Sandwich> {
        self.get_row(id)
    }

    pub fn update_sandwich(&self, id: u64, request: SandwichUpdate) -> Result<Sandwich> {
        let txn = self.write()?;
        let sandwich = {
            let mut table = txn.open_table(SANDWICHES)?;
            let mut sandwich: Sandwich = fetch_required(&table, id)?;

            if let Some(name) = request.sandwich_name {
                let name = require_text(&name, "sandwich_name")?;
                if name != sandwich.sandwich_name {
                    let mut index = txn.open_table(SANDWICH_NAMES)?;
                    claim_name(&mut index, &name, id, "Sandwich")?;
                    index.remove(sandwich.sandwich_name.as_str())?;
                    sandwich.sandwich_name = name;
                }
            }
            if let Some(price) = request.price {
                sandwich.price = price;
            }
            if let Some(category) = request.category {
                sandwich.category = optional_text(category);
            }
            if let Some(description) = request.description {
                sandwich.description = optional_text(description);
            }
            if let Some(available) = request.is_available {
                sandwich.is_available = available;
            }

            put(&mut table, &sandwich)?;
            sandwich
        };
        txn.commit()?;

        tracing::debug!(id, "updated sandwich");
        Ok(sandwich)
    }

    /// Delete a sandwich together with its recipes and reviews.
    ///
    /// Refused while any order line still names the sandwich.
    pub fn delete_sandwich(&self, id: u64) -> Result<()> {
        let txn = self.write()?;
        {
            let details: Vec<OrderDetail> = fetch_all(&txn.open_table(ORDER_DETAILS)?)?;
            if details.iter().any(|detail| detail.sandwich_id == id) {
                return Err(ShopError::Conflict(format!(
                    "Sandwich ID {id} appears in existing orders"
                )));
            }

            let sandwich: Sandwich = take(&mut txn.open_table(SANDWICHES)?, id)?;
            txn.open_table(SANDWICH_NAMES)?
                .remove(sandwich.sandwich_name.as_str())?;

            let mut recipes = txn.open_table(RECIPES)?;
            let owned: Vec<Recipe> = fetch_all(&recipes)?;
            for recipe in owned.iter().filter(|recipe| recipe.sandwich_id == id) {
                recipes.remove(recipe.id)?;
            }

            let mut reviews = txn.open_table(REVIEWS)?;
            let owned: Vec<Review> = fetch_all(&reviews)?;
            for review in owned.iter().filter(|review| review.sandwich_id == id) {
                reviews.remove(review.id)?;
            }
        }
        txn.commit()?;

        tracing::debug!(id, "deleted sandwich");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::error::ShopError;
    use crate::money::Money;
    use crate::schema::{
        OrderCreate, OrderLine, RecipeCreate, ResourceCreate, SandwichCreate, SandwichFilter,
        SandwichUpdate,
    };
    use crate::storage::tests::temp_store;

    fn sandwich(name: &str, category: &str, available: bool) -> SandwichCreate {
        SandwichCreate {
            sandwich_name: name.to_string(),
            price: Money::from_cents(599),
            category: Some(category.to_string()),
            description: None,
            is_available: available,
        }
    }

    #[test]
    fn filters_by_category_and_availability() {
        let (_dir, store) = temp_store();
        store.create_sandwich(sandwich("Classic Cheese", "vegetarian", true)).unwrap();
        store.create_sandwich(sandwich("Veggie Delight", "vegetarian", false)).unwrap();
        store.create_sandwich(sandwich("Chicken Club", "meat", true)).unwrap();

        let veg = store
            .list_sandwiches(&SandwichFilter {
                category: Some(String::from("vegetarian")),
                is_available: None,
            })
            .unwrap();
        assert_eq!(veg.len(), 2);

        let available_veg = store
            .list_sandwiches(&SandwichFilter {
                category: Some(String::from("vegetarian")),
                is_available: Some(true),
            })
            .unwrap();
        assert_eq!(available_veg.len(), 1);
        assert_eq!(available_veg[0].sandwich_name, "Classic Cheese");

        assert_eq!(store.list_sandwiches(&SandwichFilter::default()).unwrap().len(), 3);
    }

    #[test]
    fn update_is_partial_and_null_clears() {
        let (_dir, store) = temp_store();
        let created = store.create_sandwich(sandwich("Classic Cheese", "vegetarian", true)).unwrap();

        let update: SandwichUpdate =
            serde_json::from_str(r#"{"price": 6.99, "category": null}"#).unwrap();
        let updated = store.update_sandwich(created.id, update).unwrap();

        assert_eq!(updated.price, Money::from_cents(699));
        assert_eq!(updated.category, None);
        assert_eq!(updated.sandwich_name, "Classic Cheese");
        assert!(updated.is_available);
    }

    #[test]
    fn duplicate_name_conflicts_on_rename() {
        let (_dir, store) = temp_store();
        store.create_sandwich(sandwich("A", "meat", true)).unwrap();
        let b = store.create_sandwich(sandwich("B", "meat", true)).unwrap();
        let err = store
            .update_sandwich(
                b.id,
                SandwichUpdate {
                    sandwich_name: Some(String::from("A")),
                    ..SandwichUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ShopError::Conflict(_)));
    }

    #[test]
    fn delete_cascades_recipes() {
        let (_dir, store) = temp_store();
        let s = store.create_sandwich(sandwich("A", "meat", true)).unwrap();
        let r = store
            .create_resource(ResourceCreate {
                item: String::from("Bread"),
                amount: 10,
            })
            .unwrap();
        store
            .create_recipe(RecipeCreate {
                sandwich_id: s.id,
                resource_id: r.id,
                amount: 2,
            })
            .unwrap();

        store.delete_sandwich(s.id).unwrap();
        assert!(store.list_recipes(&Default::default()).unwrap().is_empty());
        // The resource is no longer referenced and can go too.
        store.delete_resource(r.id).unwrap();
    }

    #[test]
    fn ordered_sandwich_cannot_be_deleted() {
        let (_dir, store) = temp_store();
        let s = store.create_sandwich(sandwich("A", "meat", true)).unwrap();
        let placed = store
            .place_order(OrderCreate::takeout("Ada", vec![OrderLine::new(s.id, 1)]))
            .unwrap();

        let err = store.delete_sandwich(s.id).unwrap_err();
        assert!(matches!(err, ShopError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            format!("Sandwich ID {} appears in existing orders", s.id)
        );
        assert_eq!(store.get_sandwich(s.id).unwrap().sandwich_name, "A");
        assert_eq!(store.get_order(placed.order.id).unwrap().order_details.len(), 1);
    }
}
