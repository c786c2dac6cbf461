//! Inventory and ingredient order models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ingredient held in stock by a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub item: String,
    pub amount: Decimal,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A placed-but-unreceived order for an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientOrder {
    pub id: Uuid,
    pub inventory_id: Uuid,
    pub order_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stock position for one ingredient: what is on the shelf plus what is on
/// order. The reconciliation engine treats the sum as available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveStock {
    pub on_hand: Decimal,
    pub ordered: Decimal,
    pub unit: String,
}

impl EffectiveStock {
    /// Quantity the kitchen can count on: on-hand plus outstanding orders
    pub fn effective(&self) -> Decimal {
        self.on_hand + self.ordered
    }
}
