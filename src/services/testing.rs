// Fakes shared by the HTTP-layer test modules.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::config::ForwarderConfig;
use crate::models::{ForwardPayload, UserRecord};
use crate::services::{DocumentStore, RecordForwarder, WebhookSink};
use crate::utils::ForwardError;

/// Knows exactly one user, `u1`.
pub struct StaticStore;

#[async_trait]
impl DocumentStore for StaticStore {
    async fn get_document(
        &self,
        _database_id: &str,
        _collection_id: &str,
        document_id: &str,
        _credential: Option<&str>,
    ) -> Result<UserRecord, ForwardError> {
        if document_id != "u1" {
            return Err(ForwardError::Lookup("not found".to_string()));
        }
        Ok(UserRecord {
            email: Some(json!("a@x.com")),
            ..Default::default()
        })
    }
}

/// Accepts every payload.
pub struct NullWebhook;

#[async_trait]
impl WebhookSink for NullWebhook {
    async fn deliver(&self, _url: &str, _payload: &ForwardPayload) -> Result<(), ForwardError> {
        Ok(())
    }
}

pub fn static_forwarder() -> RecordForwarder {
    let config = ForwarderConfig {
        database_id: Some("db".to_string()),
        collection_id: Some("users".to_string()),
        webhook_url: Some("http://hook.local/x".to_string()),
        ..Default::default()
    };
    RecordForwarder::new(config, Arc::new(StaticStore), Arc::new(NullWebhook))
}
