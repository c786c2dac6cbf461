//! Promotional message gateway client
//!
//! Calls a webhook that drafts personalized promotional copy for a
//! customer. The webhook responds with a one-element array whose `output`
//! field carries the finished message.

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Promo gateway client
#[derive(Clone)]
pub struct PromoGatewayClient {
    client: Client,
    webhook_url: String,
}

#[derive(Debug, Serialize)]
struct PromoMessageRequest<'a> {
    customer_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct PromoMessageResponse {
    output: String,
}

impl PromoGatewayClient {
    /// Create a new PromoGatewayClient
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    /// Fetch a generated promotional message for a customer.
    ///
    /// Returns a plain error string; the campaign dispatcher counts
    /// failures instead of propagating them.
    pub async fn generate_message(&self, customer_name: &str) -> Result<String, String> {
        let request = PromoMessageRequest { customer_name };

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Promo gateway request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Promo gateway error: {}", response.status()));
        }

        let body: Vec<PromoMessageResponse> = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse promo gateway response: {}", e))?;

        body.into_iter()
            .next()
            .map(|entry| entry.output)
            .ok_or_else(|| "Promo gateway returned an empty response".to_string())
    }
}
