//! Ingredient order service
//!
//! Orders are placed against a restaurant's inventory items and stay
//! "outstanding" until received; the reconciliation engine counts them as
//! available stock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::IngredientOrder;

use crate::error::{AppError, AppResult};

/// Order service
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Input for placing an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub inventory_id: Uuid,
    pub order_amount: Decimal,
}

/// An order with its inventory item details
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: IngredientOrder,
    pub item_name: String,
    pub unit: String,
}

/// Order listing for a restaurant
#[derive(Debug, Clone, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
}

/// Row for the order listing query
#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    inventory_id: Uuid,
    order_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    item_name: String,
    unit: String,
}

impl From<OrderRow> for OrderResponse {
    fn from(row: OrderRow) -> Self {
        OrderResponse {
            order: IngredientOrder {
                id: row.id,
                inventory_id: row.inventory_id,
                order_amount: row.order_amount,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            item_name: row.item_name,
            unit: row.unit,
        }
    }
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Place an order for an inventory item of a restaurant
    pub async fn create(
        &self,
        restaurant_id: Uuid,
        input: CreateOrderInput,
    ) -> AppResult<OrderResponse> {
        if input.order_amount <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "order_amount".to_string(),
                message: "Order amount must be positive".to_string(),
            });
        }

        // Validate restaurant exists
        let restaurant_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
                .bind(restaurant_id)
                .fetch_one(&self.db)
                .await?;

        if !restaurant_exists {
            return Err(AppError::NotFound("Restaurant".to_string()));
        }

        // Validate inventory item belongs to restaurant
        let item = sqlx::query_as::<_, (String, String)>(
            "SELECT item, unit FROM inventory_items WHERE id = $1 AND restaurant_id = $2",
        )
        .bind(input.inventory_id)
        .bind(restaurant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        // Insert order and association together
        let mut tx = self.db.begin().await?;

        let (order_id, created_at, updated_at) =
            sqlx::query_as::<_, (Uuid, DateTime<Utc>, DateTime<Utc>)>(
                r#"
                INSERT INTO ingredient_orders (inventory_id, order_amount)
                VALUES ($1, $2)
                RETURNING id, created_at, updated_at
                "#,
            )
            .bind(input.inventory_id)
            .bind(input.order_amount)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO restaurant_orders (restaurant_id, order_id) VALUES ($1, $2)")
            .bind(restaurant_id)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(OrderResponse {
            order: IngredientOrder {
                id: order_id,
                inventory_id: input.inventory_id,
                order_amount: input.order_amount,
                created_at,
                updated_at,
            },
            item_name: item.0,
            unit: item.1,
        })
    }

    /// List all orders for a restaurant with their item details
    pub async fn list(&self, restaurant_id: Uuid) -> AppResult<OrderListResponse> {
        let restaurant_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
                .bind(restaurant_id)
                .fetch_one(&self.db)
                .await?;

        if !restaurant_exists {
            return Err(AppError::NotFound("Restaurant".to_string()));
        }

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.id, o.inventory_id, o.order_amount, o.created_at, o.updated_at,
                   i.item as item_name, i.unit
            FROM ingredient_orders o
            JOIN restaurant_orders ro ON ro.order_id = o.id
            JOIN inventory_items i ON i.id = o.inventory_id
            WHERE ro.restaurant_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.db)
        .await?;

        Ok(OrderListResponse {
            orders: rows.into_iter().map(OrderResponse::from).collect(),
        })
    }
}
