//! Demo dataset seeding
//!
//! Development-only: loads the JSON demo dataset into an empty database so
//! the API has something to serve. Inventory and campaigns attach to the
//! first restaurant in the file, matching the shape of the demo data.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct SeedData {
    restaurants: Vec<SeedRestaurant>,
    #[serde(default)]
    inventory: Vec<SeedInventoryItem>,
    #[serde(default)]
    campaigns: Vec<SeedCampaign>,
    #[serde(default)]
    customers: Vec<SeedCustomer>,
    #[serde(default)]
    restaurant_customers: Vec<SeedAssociation>,
    #[serde(default)]
    conversations: Vec<SeedConversation>,
}

#[derive(Debug, Deserialize)]
struct SeedRestaurant {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeedInventoryItem {
    item: String,
    amount: Decimal,
    #[serde(default = "default_unit")]
    unit: String,
}

fn default_unit() -> String {
    "units".to_string()
}

#[derive(Debug, Deserialize)]
struct SeedCampaign {
    name: String,
    #[serde(default)]
    campaign_started_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedCustomer {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeedAssociation {
    restaurant_name: String,
    customer_name: String,
}

#[derive(Debug, Deserialize)]
struct SeedConversation {
    campaign_name: String,
    customer_name: String,
    #[serde(default)]
    messages: Vec<SeedMessage>,
}

#[derive(Debug, Deserialize)]
struct SeedMessage {
    role: String,
    message: String,
}

/// Seed the demo dataset when the database is empty.
///
/// Returns true when data was loaded, false when the database already had
/// restaurants and was left untouched.
pub async fn seed_if_empty(db: &PgPool, path: impl AsRef<Path>) -> AppResult<bool> {
    let restaurant_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM restaurants")
            .fetch_one(db)
            .await?;

    if restaurant_count > 0 {
        return Ok(false);
    }

    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!(
            "Could not read seed data from {}: {}",
            path.display(),
            e
        ))
    })?;
    let data: SeedData = serde_json::from_str(&raw)
        .map_err(|e| AppError::Configuration(format!("Malformed seed data: {}", e)))?;

    let mut tx = db.begin().await?;

    let mut restaurant_ids: HashMap<String, Uuid> = HashMap::new();
    for restaurant in &data.restaurants {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO restaurants (name) VALUES ($1) RETURNING id",
        )
        .bind(&restaurant.name)
        .fetch_one(&mut *tx)
        .await?;
        restaurant_ids.insert(restaurant.name.clone(), id);
        tracing::info!("Seeded restaurant: {}", restaurant.name);
    }

    let first_restaurant = data
        .restaurants
        .first()
        .and_then(|r| restaurant_ids.get(&r.name))
        .copied();

    if let Some(restaurant_id) = first_restaurant {
        for item in &data.inventory {
            sqlx::query(
                "INSERT INTO inventory_items (restaurant_id, item, amount, unit) VALUES ($1, $2, $3, $4)",
            )
            .bind(restaurant_id)
            .bind(&item.item)
            .bind(item.amount)
            .bind(&item.unit)
            .execute(&mut *tx)
            .await?;
        }
    }

    let mut campaign_ids: HashMap<String, Uuid> = HashMap::new();
    if let Some(restaurant_id) = first_restaurant {
        for campaign in &data.campaigns {
            let id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO campaigns (restaurant_id, name, campaign_started_id) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(restaurant_id)
            .bind(&campaign.name)
            .bind(&campaign.campaign_started_id)
            .fetch_one(&mut *tx)
            .await?;
            campaign_ids.insert(campaign.name.clone(), id);
        }
    }

    let mut customer_ids: HashMap<String, Uuid> = HashMap::new();
    for customer in &data.customers {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO customers (name) VALUES ($1) RETURNING id",
        )
        .bind(&customer.name)
        .fetch_one(&mut *tx)
        .await?;
        customer_ids.insert(customer.name.clone(), id);
    }

    for association in &data.restaurant_customers {
        let (Some(restaurant_id), Some(customer_id)) = (
            restaurant_ids.get(&association.restaurant_name),
            customer_ids.get(&association.customer_name),
        ) else {
            tracing::warn!(
                "Skipping association {} <-> {}: unknown name",
                association.restaurant_name,
                association.customer_name
            );
            continue;
        };

        sqlx::query(
            "INSERT INTO restaurant_customers (restaurant_id, customer_id) VALUES ($1, $2)",
        )
        .bind(restaurant_id)
        .bind(customer_id)
        .execute(&mut *tx)
        .await?;
    }

    for conversation in &data.conversations {
        let (Some(campaign_id), Some(customer_id)) = (
            campaign_ids.get(&conversation.campaign_name),
            customer_ids.get(&conversation.customer_name),
        ) else {
            tracing::warn!(
                "Skipping conversation for campaign {}: unknown name",
                conversation.campaign_name
            );
            continue;
        };

        let conversation_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO conversations (campaign_id, customer_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(campaign_id)
        .bind(customer_id)
        .fetch_one(&mut *tx)
        .await?;

        for message in &conversation.messages {
            sqlx::query("INSERT INTO messages (conversation_id, role, body) VALUES ($1, $2, $3)")
                .bind(conversation_id)
                .bind(&message.role)
                .bind(&message.message)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        "Seeded demo dataset: {} restaurants, {} customers",
        data.restaurants.len(),
        data.customers.len()
    );

    Ok(true)
}
