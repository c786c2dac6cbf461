//! Inventory-forecast reconciliation engine
//!
//! Combines the sales forecast with the recipe catalog to compute total
//! ingredient requirements over the horizon, diffs them against effective
//! inventory and classifies each required ingredient as shortage, excess
//! or neutral. Promotion candidates are derived from the excess list.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use shared::models::{DailySalesForecast, EffectiveStock, MenuItemKey, RecipeCatalog, SalesForecast};

use crate::error::AppResult;
use crate::services::inventory::InventoryService;
use crate::services::promotion::{recommend, PromotionRecommendation};
use crate::services::restaurant::RestaurantService;

/// Units above the required amount before stock counts as surplus.
/// A difference exactly at the threshold stays neutral.
pub const EXCESS_THRESHOLD: i64 = 20;

/// Total requirement for one ingredient across the forecast horizon
#[derive(Debug, Clone)]
pub struct IngredientRequirement {
    pub item: String,
    pub amount: Decimal,
    pub unit: String,
    /// Display names of the menu items that demand this ingredient
    pub menu_items: Vec<String>,
}

/// Ingredient requirements in first-appearance order
#[derive(Debug, Clone, Default)]
pub struct RequirementSet {
    entries: Vec<IngredientRequirement>,
}

impl RequirementSet {
    fn add(&mut self, item: &str, amount: Decimal, unit: &str, menu_item: &str) {
        match self.entries.iter_mut().find(|e| e.item == item) {
            Some(entry) => {
                entry.amount += amount;
                if !entry.menu_items.iter().any(|m| m == menu_item) {
                    entry.menu_items.push(menu_item.to_string());
                }
            }
            None => self.entries.push(IngredientRequirement {
                item: item.to_string(),
                amount,
                unit: unit.to_string(),
                menu_items: vec![menu_item.to_string()],
            }),
        }
    }

    pub fn entries(&self) -> &[IngredientRequirement] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate ingredient requirements over all forecast days.
///
/// Menu items without a catalog entry contribute nothing; they are logged
/// and skipped rather than failing the run. Days where an item predicts
/// zero sales add no demand.
pub fn aggregate_requirements(
    days: &[DailySalesForecast],
    catalog: &RecipeCatalog,
) -> RequirementSet {
    let mut requirements = RequirementSet::default();

    for day in days {
        for key in MenuItemKey::ALL {
            let quantity = day.quantity(key);
            if quantity <= 0 {
                continue;
            }

            let Some(recipe) = catalog.get(key) else {
                tracing::debug!("No recipe for menu item {}, skipping", key.as_str());
                continue;
            };

            for ingredient in &recipe.ingredients {
                requirements.add(
                    &ingredient.item,
                    ingredient.amount * Decimal::from(quantity),
                    &ingredient.unit,
                    &recipe.name,
                );
            }
        }
    }

    requirements
}

/// A required ingredient diffed against effective inventory
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationItem {
    pub item: String,
    pub current_amount: Decimal,
    pub required_amount: Decimal,
    /// current - required; negative means shortage, positive means excess
    pub difference: Decimal,
    pub unit: String,
    pub menu_items: Vec<String>,
    pub ordered_amount: Decimal,
}

/// Classified reconciliation result
#[derive(Debug, Clone, Serialize)]
pub struct ForecastSummary {
    /// Ingredients with shortages, worst first
    pub shortages: Vec<ReconciliationItem>,
    /// Ingredients with significant excess, largest surplus first
    pub excesses: Vec<ReconciliationItem>,
}

/// Diff requirements against the inventory snapshot.
///
/// Ingredients absent from the snapshot count as zero stock; inventory
/// entries nothing demands are ignored. Sorting is stable, so equal
/// differences keep aggregation order.
pub fn reconcile(
    requirements: &RequirementSet,
    inventory: &HashMap<String, EffectiveStock>,
) -> ForecastSummary {
    let threshold = Decimal::from(EXCESS_THRESHOLD);
    let mut shortages = Vec::new();
    let mut excesses = Vec::new();

    for required in requirements.entries() {
        let (current, ordered) = inventory
            .get(&required.item)
            .map(|stock| (stock.effective(), stock.ordered))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));

        let difference = current - required.amount;

        let item = ReconciliationItem {
            item: required.item.clone(),
            current_amount: current,
            required_amount: required.amount,
            difference,
            unit: required.unit.clone(),
            menu_items: required.menu_items.clone(),
            ordered_amount: ordered,
        };

        if difference < Decimal::ZERO {
            shortages.push(item);
        } else if difference > threshold {
            excesses.push(item);
        }
    }

    shortages.sort_by(|a, b| a.difference.cmp(&b.difference));
    excesses.sort_by(|a, b| b.difference.cmp(&a.difference));

    ForecastSummary { shortages, excesses }
}

/// Full reconciliation report for a restaurant
#[derive(Debug, Clone, Serialize)]
pub struct InventoryForecastResponse {
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub forecast_summary: ForecastSummary,
    pub promotion_recommendations: Vec<PromotionRecommendation>,
    pub promotable_menu_items_count: usize,
}

/// Reconciliation service orchestrating the aggregate -> reconcile ->
/// recommend pipeline for one request
#[derive(Clone)]
pub struct ReconciliationService {
    db: PgPool,
}

impl ReconciliationService {
    /// Create a new ReconciliationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build the inventory-forecast report for a restaurant
    pub async fn inventory_forecast(
        &self,
        restaurant_id: Uuid,
        forecast: &SalesForecast,
        catalog: &RecipeCatalog,
        today: NaiveDate,
    ) -> AppResult<InventoryForecastResponse> {
        let restaurant = RestaurantService::new(self.db.clone())
            .get(restaurant_id)
            .await?;

        let inventory = InventoryService::new(self.db.clone())
            .effective_inventory(restaurant_id)
            .await?;

        let requirements = aggregate_requirements(&forecast.days, catalog);
        let summary = reconcile(&requirements, &inventory);

        let started_keys = self.started_campaign_keys(restaurant_id).await?;
        let recommendations = recommend(&summary.excesses, catalog, &started_keys, today);
        let promotable_menu_items_count = recommendations.len();

        Ok(InventoryForecastResponse {
            restaurant_id: restaurant.id,
            restaurant_name: restaurant.name,
            forecast_summary: summary,
            promotion_recommendations: recommendations,
            promotable_menu_items_count,
        })
    }

    /// Dedup keys of campaigns already started for this restaurant
    async fn started_campaign_keys(&self, restaurant_id: Uuid) -> AppResult<HashSet<String>> {
        let keys = sqlx::query_scalar::<_, String>(
            r#"
            SELECT campaign_started_id FROM campaigns
            WHERE restaurant_id = $1 AND campaign_started_id IS NOT NULL
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.db)
        .await?;

        Ok(keys.into_iter().collect())
    }
}
