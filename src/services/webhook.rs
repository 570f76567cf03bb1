use async_trait::async_trait;

use crate::models::ForwardPayload;
use crate::utils::ForwardError;

#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// POSTs the payload as JSON. Only a 2xx response counts as delivered.
    async fn deliver(&self, url: &str, payload: &ForwardPayload) -> Result<(), ForwardError>;
}

/// reqwest-backed webhook delivery
#[derive(Clone)]
pub struct HttpWebhook {
    client: reqwest::Client,
}

impl HttpWebhook {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// `Webhook failed: <reason phrase>`, falling back to the numeric code
pub fn failure_message(status: reqwest::StatusCode) -> String {
    format!(
        "Webhook failed: {}",
        status.canonical_reason().unwrap_or(status.as_str())
    )
}

#[async_trait]
impl WebhookSink for HttpWebhook {
    async fn deliver(&self, url: &str, payload: &ForwardPayload) -> Result<(), ForwardError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| ForwardError::Delivery(format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Webhook responded {} with body: {}", status, body);
            return Err(ForwardError::Delivery(failure_message(status)));
        }

        Ok(())
    }
}
