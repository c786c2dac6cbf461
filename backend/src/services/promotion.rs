//! Promotion recommender
//!
//! Scans the catalog for menu items whose ingredients are ALL in excess
//! and works out how many extra units the surplus could produce. Items
//! whose campaign was already started today are suppressed so repeated
//! reconciliation runs stay idempotent.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use shared::models::RecipeCatalog;
use shared::validation::campaign_started_id;

use crate::services::reconciliation::ReconciliationItem;

/// Surplus detail for one ingredient of a recommended menu item
#[derive(Debug, Clone, Serialize)]
pub struct IngredientExcess {
    pub ingredient: String,
    pub excess: String,
}

/// A menu item worth promoting because its ingredients are surplus
#[derive(Debug, Clone, Serialize)]
pub struct PromotionRecommendation {
    pub menu_item: String,
    pub reason: String,
    /// How many of this item the excess could produce, bottlenecked by
    /// the scarcest surplus ingredient
    pub potential_quantity: i64,
    pub ingredient_excesses: Vec<IngredientExcess>,
    pub campaign_started_id: String,
}

/// Derive promotion recommendations from the excess list.
///
/// A menu item qualifies only when every one of its ingredients appears
/// in the excess set; partial coverage does not count. Results follow
/// catalog iteration order.
pub fn recommend(
    excesses: &[ReconciliationItem],
    catalog: &RecipeCatalog,
    started_campaign_keys: &HashSet<String>,
    today: NaiveDate,
) -> Vec<PromotionRecommendation> {
    let excess_by_item: HashMap<&str, &ReconciliationItem> = excesses
        .iter()
        .map(|item| (item.item.as_str(), item))
        .collect();

    let mut recommendations = Vec::new();

    for (_, recipe) in catalog.iter() {
        if recipe.ingredients.is_empty() {
            continue;
        }

        let mut ingredient_excesses = Vec::with_capacity(recipe.ingredients.len());
        let mut potential_quantity: Option<i64> = None;
        let mut all_in_excess = true;

        for ingredient in &recipe.ingredients {
            let Some(excess) = excess_by_item.get(ingredient.item.as_str()) else {
                all_in_excess = false;
                break;
            };

            ingredient_excesses.push(IngredientExcess {
                ingredient: ingredient.item.clone(),
                excess: format!("{} {}", excess.difference.normalize(), excess.unit),
            });

            // Catalog load guarantees amount > 0
            let producible = (excess.difference / ingredient.amount)
                .floor()
                .to_i64()
                .unwrap_or(0);
            potential_quantity =
                Some(potential_quantity.map_or(producible, |current| current.min(producible)));
        }

        if !all_in_excess {
            continue;
        }

        let quantity = potential_quantity.unwrap_or(0);
        let dedup_key = campaign_started_id(&recipe.name, today);

        // A campaign with this key was already launched today
        if started_campaign_keys.contains(&dedup_key) {
            continue;
        }

        recommendations.push(PromotionRecommendation {
            menu_item: recipe.name.clone(),
            reason: format!("Can make {} additional items", quantity),
            potential_quantity: quantity,
            ingredient_excesses,
            campaign_started_id: dedup_key,
        });
    }

    recommendations
}
