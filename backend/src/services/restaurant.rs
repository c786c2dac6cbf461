//! Restaurant lookup service

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::Restaurant;

use crate::error::{AppError, AppResult};

/// Restaurant service
#[derive(Clone)]
pub struct RestaurantService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct RestaurantRow {
    id: Uuid,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Restaurant {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl RestaurantService {
    /// Create a new RestaurantService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all restaurants
    pub async fn list(&self) -> AppResult<Vec<Restaurant>> {
        let rows = sqlx::query_as::<_, RestaurantRow>(
            "SELECT id, name, created_at, updated_at FROM restaurants ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    /// Get a restaurant by id
    pub async fn get(&self, restaurant_id: Uuid) -> AppResult<Restaurant> {
        let row = sqlx::query_as::<_, RestaurantRow>(
            "SELECT id, name, created_at, updated_at FROM restaurants WHERE id = $1",
        )
        .bind(restaurant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant".to_string()))?;

        Ok(row.into())
    }
}
