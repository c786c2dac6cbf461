//! Inventory ledger service
//!
//! Read side of the stock picture: per-restaurant inventory listings and
//! the effective-inventory snapshot (on-hand plus outstanding orders) the
//! reconciliation engine works from.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{EffectiveStock, InventoryItem};

use crate::error::{AppError, AppResult};

/// Inventory service
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Inventory listing for a restaurant
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantInventoryResponse {
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, FromRow)]
struct InventoryItemRow {
    id: Uuid,
    restaurant_id: Uuid,
    item: String,
    amount: Decimal,
    unit: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InventoryItemRow> for InventoryItem {
    fn from(row: InventoryItemRow) -> Self {
        InventoryItem {
            id: row.id,
            restaurant_id: row.restaurant_id,
            item: row.item,
            amount: row.amount,
            unit: row.unit,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row for the effective-inventory query
#[derive(Debug, FromRow)]
struct EffectiveStockRow {
    item: String,
    amount: Decimal,
    unit: String,
    ordered: Decimal,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List inventory items for a restaurant
    pub async fn list_for_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> AppResult<RestaurantInventoryResponse> {
        let restaurant_name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM restaurants WHERE id = $1",
        )
        .bind(restaurant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant".to_string()))?;

        let rows = sqlx::query_as::<_, InventoryItemRow>(
            r#"
            SELECT id, restaurant_id, item, amount, unit, created_at, updated_at
            FROM inventory_items
            WHERE restaurant_id = $1
            ORDER BY item
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.db)
        .await?;

        Ok(RestaurantInventoryResponse {
            restaurant_id,
            restaurant_name,
            items: rows.into_iter().map(InventoryItem::from).collect(),
        })
    }

    /// Snapshot of effective inventory for a restaurant: per ingredient,
    /// the on-hand amount and the sum of outstanding order amounts.
    pub async fn effective_inventory(
        &self,
        restaurant_id: Uuid,
    ) -> AppResult<HashMap<String, EffectiveStock>> {
        let rows = sqlx::query_as::<_, EffectiveStockRow>(
            r#"
            SELECT i.item, i.amount, i.unit,
                   COALESCE(SUM(o.order_amount), 0) as ordered
            FROM inventory_items i
            LEFT JOIN ingredient_orders o ON o.inventory_id = i.id
            WHERE i.restaurant_id = $1
            GROUP BY i.id, i.item, i.amount, i.unit
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.item,
                    EffectiveStock {
                        on_hand: row.amount,
                        ordered: row.ordered,
                        unit: row.unit,
                    },
                )
            })
            .collect())
    }
}
