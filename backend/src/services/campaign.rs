//! Campaign service
//!
//! Campaign creation with day-granular dedup, the promotional message
//! fan-out, and the aggregate view backing the promotion-management UI.
//!
//! The fan-out dispatches one message per customer through a bounded
//! worker pool. Every task checks its own connection out of the pool;
//! a failed dispatch is counted, never propagated, so one unreachable
//! customer cannot abort the batch.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

use shared::models::{Customer, MessageRole};
use shared::types::DispatchSummary;

use crate::error::{AppError, AppResult};
use crate::external::promo_gateway::PromoGatewayClient;

/// Preview length for the last message of a conversation
const PREVIEW_CHARS: usize = 50;

/// Campaign service
#[derive(Clone)]
pub struct CampaignService {
    db: PgPool,
    gateway: PromoGatewayClient,
    max_concurrent_dispatches: usize,
}

/// Input for starting a campaign
#[derive(Debug, Default, Deserialize)]
pub struct StartCampaignInput {
    pub name: Option<String>,
    pub campaign_started_id: Option<String>,
}

/// Result of a campaign start request
#[derive(Debug, Serialize)]
pub struct StartCampaignResponse {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    pub already_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<DispatchSummary>,
}

/// A message as shown in the promotion UI
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: Uuid,
    pub role: MessageRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A conversation with its messages and customer context
#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub messages: Vec<MessageView>,
    pub last_message: String,
    pub last_updated: DateTime<Utc>,
}

/// A campaign with all its conversations
#[derive(Debug, Clone, Serialize)]
pub struct CampaignView {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub conversations: Vec<ConversationView>,
}

/// Everything the promotion-management UI needs for one restaurant
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantCampaignResponse {
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub campaigns: Vec<CampaignView>,
    pub customers: Vec<Customer>,
}

#[derive(Debug, FromRow)]
struct CampaignRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ConversationRow {
    id: Uuid,
    campaign_id: Uuid,
    customer_id: Uuid,
    customer_name: String,
}

#[derive(Debug, FromRow)]
struct MessageRow {
    id: Uuid,
    conversation_id: Uuid,
    role: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl CampaignService {
    /// Create a new CampaignService instance
    pub fn new(db: PgPool, gateway: PromoGatewayClient, max_concurrent_dispatches: usize) -> Self {
        Self {
            db,
            gateway,
            max_concurrent_dispatches: max_concurrent_dispatches.max(1),
        }
    }

    /// Check whether a campaign with this dedup key was already started
    pub async fn has_campaign(
        &self,
        restaurant_id: Uuid,
        campaign_started_id: &str,
    ) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM campaigns
                WHERE restaurant_id = $1 AND campaign_started_id = $2
            )
            "#,
        )
        .bind(restaurant_id)
        .bind(campaign_started_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    /// Create a campaign and message every customer of the restaurant.
    ///
    /// When the dedup key already exists the stored campaign is returned
    /// unchanged and nothing is sent.
    pub async fn start_campaign(
        &self,
        restaurant_id: Uuid,
        input: StartCampaignInput,
    ) -> AppResult<StartCampaignResponse> {
        let restaurant_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
                .bind(restaurant_id)
                .fetch_one(&self.db)
                .await?;

        if !restaurant_exists {
            return Err(AppError::NotFound("Restaurant".to_string()));
        }

        if let Some(dedup_key) = input.campaign_started_id.as_deref() {
            if self.has_campaign(restaurant_id, dedup_key).await? {
                let existing = sqlx::query_as::<_, CampaignRow>(
                    r#"
                    SELECT id, name, created_at FROM campaigns
                    WHERE restaurant_id = $1 AND campaign_started_id = $2
                    "#,
                )
                .bind(restaurant_id)
                .bind(dedup_key)
                .fetch_one(&self.db)
                .await?;

                return Ok(StartCampaignResponse {
                    id: existing.id,
                    name: existing.name,
                    message: format!(
                        "Campaign with this identifier already exists (created on {})",
                        existing.created_at.format("%Y-%m-%d")
                    ),
                    already_exists: true,
                    dispatch: None,
                });
            }
        }

        let name = input
            .name
            .unwrap_or_else(|| format!("Campaign {}", Utc::now().format("%Y-%m-%d %H:%M")));

        let campaign = sqlx::query_as::<_, CampaignRow>(
            r#"
            INSERT INTO campaigns (restaurant_id, name, campaign_started_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, created_at
            "#,
        )
        .bind(restaurant_id)
        .bind(&name)
        .bind(&input.campaign_started_id)
        .fetch_one(&self.db)
        .await?;

        let customers = self.customers_of(restaurant_id).await?;

        tracing::info!(
            "Starting campaign '{}' for {} customers",
            campaign.name,
            customers.len()
        );

        if customers.is_empty() {
            return Ok(StartCampaignResponse {
                id: campaign.id,
                name: campaign.name,
                message: "Campaign created but no customers found to send messages to".to_string(),
                already_exists: false,
                dispatch: None,
            });
        }

        let summary = self.dispatch_to_all(campaign.id, customers).await;

        Ok(StartCampaignResponse {
            id: campaign.id,
            name: campaign.name,
            message: format!(
                "Campaign created and {} messages sent successfully",
                summary.succeeded
            ),
            already_exists: false,
            dispatch: Some(summary),
        })
    }

    /// Customers associated with a restaurant
    async fn customers_of(&self, restaurant_id: Uuid) -> AppResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT c.id, c.name
            FROM customers c
            JOIN restaurant_customers rc ON rc.customer_id = c.id
            WHERE rc.restaurant_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Customer { id, name })
            .collect())
    }

    /// Send a promotional message to every customer concurrently.
    ///
    /// Concurrency is capped by a semaphore; each task clones the pool
    /// handle and checks out its own connection. Failures are tallied,
    /// not propagated.
    async fn dispatch_to_all(&self, campaign_id: Uuid, customers: Vec<Customer>) -> DispatchSummary {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_dispatches));
        let mut tasks: JoinSet<bool> = JoinSet::new();

        for customer in customers {
            let semaphore = semaphore.clone();
            let db = self.db.clone();
            let gateway = self.gateway.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return false,
                };

                match send_promo_message(&db, &gateway, campaign_id, &customer).await {
                    Ok(()) => {
                        tracing::debug!("Message sent to {}", customer.name);
                        true
                    }
                    Err(e) => {
                        tracing::warn!("Failed to message customer {}: {}", customer.id, e);
                        false
                    }
                }
            });
        }

        let mut summary = DispatchSummary::default();
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(true) => summary.record_success(),
                Ok(false) => summary.record_failure(),
                Err(e) => {
                    tracing::warn!("Dispatch task panicked: {}", e);
                    summary.record_failure();
                }
            }
        }

        tracing::info!(
            "Campaign {} dispatch complete: {}/{} succeeded",
            campaign_id,
            summary.succeeded,
            summary.total
        );

        summary
    }

    /// Campaigns with conversations, messages and the customer directory
    /// for one restaurant
    pub async fn restaurant_campaigns(
        &self,
        restaurant_id: Uuid,
    ) -> AppResult<RestaurantCampaignResponse> {
        let restaurant = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, name FROM restaurants WHERE id = $1",
        )
        .bind(restaurant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant".to_string()))?;

        let campaigns = sqlx::query_as::<_, CampaignRow>(
            r#"
            SELECT id, name, created_at FROM campaigns
            WHERE restaurant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.db)
        .await?;

        let conversations = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT cv.id, cv.campaign_id, cv.customer_id, c.name as customer_name
            FROM conversations cv
            JOIN campaigns cp ON cp.id = cv.campaign_id
            JOIN customers c ON c.id = cv.customer_id
            WHERE cp.restaurant_id = $1
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.db)
        .await?;

        let messages = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.id, m.conversation_id, m.role, m.body, m.created_at
            FROM messages m
            JOIN conversations cv ON cv.id = m.conversation_id
            JOIN campaigns cp ON cp.id = cv.campaign_id
            WHERE cp.restaurant_id = $1
            ORDER BY m.created_at, m.id
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.db)
        .await?;

        let mut messages_by_conversation: HashMap<Uuid, Vec<MessageView>> = HashMap::new();
        for row in messages {
            messages_by_conversation
                .entry(row.conversation_id)
                .or_default()
                .push(MessageView {
                    id: row.id,
                    role: parse_role(&row.role),
                    message: row.body,
                    timestamp: row.created_at,
                });
        }

        let mut customers: Vec<Customer> = Vec::new();
        let mut conversations_by_campaign: HashMap<Uuid, Vec<ConversationView>> = HashMap::new();

        for row in conversations {
            if !customers.iter().any(|c| c.id == row.customer_id) {
                customers.push(Customer {
                    id: row.customer_id,
                    name: row.customer_name.clone(),
                });
            }

            let messages = messages_by_conversation
                .remove(&row.id)
                .unwrap_or_default();
            let last_updated = messages
                .last()
                .map(|m| m.timestamp)
                .unwrap_or_else(Utc::now);
            let last_message = messages
                .last()
                .map(|m| preview(&m.message))
                .unwrap_or_default();

            conversations_by_campaign
                .entry(row.campaign_id)
                .or_default()
                .push(ConversationView {
                    id: row.id,
                    campaign_id: row.campaign_id,
                    customer_id: row.customer_id,
                    customer_name: row.customer_name,
                    messages,
                    last_message,
                    last_updated,
                });
        }

        let campaigns = campaigns
            .into_iter()
            .map(|row| CampaignView {
                conversations: conversations_by_campaign.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                created_at: row.created_at,
            })
            .collect();

        Ok(RestaurantCampaignResponse {
            restaurant_id: restaurant.0,
            restaurant_name: restaurant.1,
            campaigns,
            customers,
        })
    }
}

/// Generate and persist one promotional message
async fn send_promo_message(
    db: &PgPool,
    gateway: &PromoGatewayClient,
    campaign_id: Uuid,
    customer: &Customer,
) -> Result<(), String> {
    let body = gateway.generate_message(&customer.name).await?;

    let mut tx = db.begin().await.map_err(|e| e.to_string())?;

    let conversation_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO conversations (campaign_id, customer_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(campaign_id)
    .bind(customer.id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| e.to_string())?;

    sqlx::query("INSERT INTO messages (conversation_id, role, body) VALUES ($1, $2, $3)")
        .bind(conversation_id)
        .bind(MessageRole::System.as_str())
        .bind(&body)
        .execute(&mut *tx)
        .await
        .map_err(|e| e.to_string())?;

    tx.commit().await.map_err(|e| e.to_string())
}

fn parse_role(raw: &str) -> MessageRole {
    match raw {
        "user" => MessageRole::User,
        "assistant" => MessageRole::Assistant,
        _ => MessageRole::System,
    }
}

/// Truncate a message body for list previews
fn preview(message: &str) -> String {
    let truncated: String = message.chars().take(PREVIEW_CHARS).collect();
    if message.chars().count() > PREVIEW_CHARS {
        format!("{}...", truncated)
    } else {
        truncated
    }
}
