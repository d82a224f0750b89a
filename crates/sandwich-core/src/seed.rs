//! # Seed Module
//!
//! Sample inventory, menu, recipes and promo codes for a fresh shop.

use crate::error::{Result, ShopError};
use crate::money::{Money, Percent};
use crate::schema::{PromotionalCodeCreate, RecipeCreate, ResourceCreate, SandwichCreate};
use crate::storage::Store;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Starting stock: `(item, amount)`.
pub const RESOURCES: [(&str, u64); 10] = [
    ("Bread", 100),
    ("Cheese", 50),
    ("Lettuce", 30),
    ("Tomato", 40),
    ("Chicken", 25),
    ("Beef", 20),
    ("Bacon", 30),
    ("Mayonnaise", 15),
    ("Mustard", 20),
    ("Pickles", 35),
];

struct MenuItem {
    name: &'static str,
    cents: i64,
    category: &'static str,
    description: &'static str,
    recipe: &'static [(&'static str, u64)],
}

const MENU: [MenuItem; 5] = [
    MenuItem {
        name: "Classic Cheese",
        cents: 599,
        category: "vegetarian",
        description: "A simple and delicious cheese sandwich",
        recipe: &[("Bread", 2), ("Cheese", 2), ("Mayonnaise", 1)],
    },
    MenuItem {
        name: "Veggie Delight",
        cents: 699,
        category: "vegetarian",
        description: "Fresh vegetables with lettuce and tomato",
        recipe: &[("Bread", 2), ("Lettuce", 2), ("Tomato", 2), ("Pickles", 1)],
    },
    MenuItem {
        name: "Chicken Club",
        cents: 899,
        category: "meat",
        description: "Grilled chicken with bacon and cheese",
        recipe: &[
            ("Bread", 2),
            ("Chicken", 1),
            ("Bacon", 2),
            ("Cheese", 1),
            ("Lettuce", 1),
        ],
    },
    MenuItem {
        name: "Beef Burger",
        cents: 999,
        category: "meat",
        description: "Juicy beef patty with all the fixings",
        recipe: &[
            ("Bread", 2),
            ("Beef", 1),
            ("Cheese", 1),
            ("Lettuce", 1),
            ("Tomato", 1),
            ("Pickles", 1),
        ],
    },
    MenuItem {
        name: "BLT",
        cents: 799,
        category: "meat",
        description: "Bacon, lettuce, and tomato classic",
        recipe: &[
            ("Bread", 2),
            ("Bacon", 3),
            ("Lettuce", 1),
            ("Tomato", 2),
            ("Mayonnaise", 1),
        ],
    },
];

/// Promo codes as `(code, whole percent)`.
pub const PROMO_CODES: [(&str, u32); 3] = [("SAVE10", 10), ("WELCOME20", 20), ("STUDENT15", 15)];

/// Days the seeded promo codes stay valid.
pub const PROMO_VALID_DAYS: i64 = 30;

/// Rows created by a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub resources: usize,
    pub sandwiches: usize,
    pub recipes: usize,
    pub promotional_codes: usize,
}

impl Store {
    /// Load the sample data into an empty store.
    pub fn seed(&self) -> Result<SeedSummary> {
        self.seed_at(Utc::now())
    }

    /// Load the sample data, with promo codes expiring relative to `now`.
    ///
    /// Fails with `Conflict` if the store already holds any rows.
    pub fn seed_at(&self, now: DateTime<Utc>) -> Result<SeedSummary> {
        if self.status()?.total() > 0 {
            return Err(ShopError::Conflict(String::from(
                "Store already contains data",
            )));
        }

        let mut summary = SeedSummary::default();
        let mut resource_ids = BTreeMap::new();
        for (item, amount) in RESOURCES {
            let resource = self.create_resource(ResourceCreate {
                item: item.to_string(),
                amount,
            })?;
            resource_ids.insert(item, resource.id);
            summary.resources += 1;
        }

        for item in &MENU {
            let sandwich = self.create_sandwich(SandwichCreate {
                sandwich_name: item.name.to_string(),
                price: Money::from_cents(item.cents),
                category: Some(item.category.to_string()),
                description: Some(item.description.to_string()),
                is_available: true,
            })?;
            summary.sandwiches += 1;

            for (ingredient, amount) in item.recipe {
                let resource_id = resource_ids.get(ingredient).copied().ok_or_else(|| {
                    ShopError::NotFound(format!("Resource '{ingredient}' not found"))
                })?;
                self.create_recipe(RecipeCreate {
                    sandwich_id: sandwich.id,
                    resource_id,
                    amount: *amount,
                })?;
                summary.recipes += 1;
            }
        }

        let expires = now + Duration::days(PROMO_VALID_DAYS);
        for (code, percent) in PROMO_CODES {
            let discount_percent = Percent::whole(percent).ok_or_else(|| {
                ShopError::Validation(format!("discount_percent {percent} is out of range"))
            })?;
            self.create_promotional_code(PromotionalCodeCreate {
                code: code.to_string(),
                discount_percent,
                expiration_date: Some(expires),
                is_active: true,
            })?;
            summary.promotional_codes += 1;
        }

        tracing::info!(
            resources = summary.resources,
            sandwiches = summary.sandwiches,
            recipes = summary.recipes,
            promotional_codes = summary.promotional_codes,
            "seeded store"
        );
        Ok(summary)
    }
}
