//! # Stock Module
//!
//! Ingredient availability checks for order placement.
//!
//! Every function here is pure: callers load recipes and resources inside
//! their write transaction and apply the returned demand themselves.

use crate::model::{Recipe, Resource};
use std::collections::{BTreeMap, BTreeSet};

/// Units needed per resource id.
pub type Demand = BTreeMap<u64, u64>;

/// Shortages for making `quantity` of one sandwich.
///
/// Reports `Resource ID {id} not found` for a recipe whose resource is gone
/// and `Insufficient {item}: need {n}, have {m}` for every short resource.
#[must_use]
pub fn line_shortages(
    recipes: &[Recipe],
    quantity: u64,
    resources: &BTreeMap<u64, Resource>,
) -> Vec<String> {
    let mut shortages = Vec::new();
    for recipe in recipes {
        let Some(resource) = resources.get(&recipe.resource_id) else {
            shortages.push(format!("Resource ID {} not found", recipe.resource_id));
            continue;
        };
        let required = recipe.amount.saturating_mul(quantity);
        if resource.amount < required {
            shortages.push(format!(
                "Insufficient {}: need {}, have {}",
                resource.item, required, resource.amount
            ));
        }
    }
    shortages
}

/// Total units per resource for a set of `(recipes, quantity)` lines.
#[must_use]
pub fn total_demand<'a>(lines: impl IntoIterator<Item = (&'a [Recipe], u64)>) -> Demand {
    let mut demand = Demand::new();
    for (recipes, quantity) in lines {
        for recipe in recipes {
            let entry = demand.entry(recipe.resource_id).or_insert(0);
            *entry = entry.saturating_add(recipe.amount.saturating_mul(quantity));
        }
    }
    demand
}

/// Every shortage for a whole order.
///
/// Each line is checked on its own first. Resources shared between lines are
/// then checked against their combined demand, so two lines that each fit
/// cannot together oversell. A resource is reported at most once.
#[must_use]
pub fn order_shortages(
    lines: &[(&[Recipe], u64)],
    resources: &BTreeMap<u64, Resource>,
) -> Vec<String> {
    let mut shortages = Vec::new();
    let mut reported = BTreeSet::new();

    for (recipes, quantity) in lines {
        for shortage in line_shortages(recipes, *quantity, resources) {
            if !shortages.contains(&shortage) {
                shortages.push(shortage);
            }
        }
        for recipe in *recipes {
            let short = resources
                .get(&recipe.resource_id)
                .is_none_or(|r| r.amount < recipe.amount.saturating_mul(*quantity));
            if short {
                reported.insert(recipe.resource_id);
            }
        }
    }

    for (resource_id, required) in total_demand(lines.iter().copied()) {
        if reported.contains(&resource_id) {
            continue;
        }
        if let Some(resource) = resources.get(&resource_id) {
            if resource.amount < required {
                shortages.push(format!(
                    "Insufficient {}: need {}, have {}",
                    resource.item, required, resource.amount
                ));
            }
        }
    }

    shortages
}
