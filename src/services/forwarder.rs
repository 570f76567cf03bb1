// ==================== RECORD FORWARDER ====================
// Fetch one user document and relay a projection of it to the webhook.
// Linear pipeline: two validation gates, then lookup, projection, delivery.

use std::sync::Arc;

use crate::config::ForwarderConfig;
use crate::models::{ForwardRequest, ForwardResponse};
use crate::services::document_store::DocumentStore;
use crate::services::webhook::WebhookSink;
use crate::utils::ForwardError;

pub const MISSING_USER_ID: &str = "Missing userId in request body";
pub const MISSING_TARGET: &str = "Missing database or collection ID in environment variables";
pub const MISSING_WEBHOOK: &str = "Missing webhook URL in environment variables";

#[derive(Clone)]
pub struct RecordForwarder {
    config: ForwarderConfig,
    store: Arc<dyn DocumentStore>,
    webhook: Arc<dyn WebhookSink>,
}

impl RecordForwarder {
    pub fn new(
        config: ForwarderConfig,
        store: Arc<dyn DocumentStore>,
        webhook: Arc<dyn WebhookSink>,
    ) -> Self {
        Self {
            config,
            store,
            webhook,
        }
    }

    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    /// Runs one execution. Never fails: every error becomes `{ "error": ... }`.
    pub async fn handle(&self, request: &ForwardRequest) -> ForwardResponse {
        let execution_id = uuid::Uuid::new_v4().simple().to_string();

        match self.forward(&execution_id, request).await {
            Ok(user_id) => {
                log::info!("✅ [{}] Webhook sent successfully for user: {}", execution_id, user_id);
                ForwardResponse::success(user_id)
            }
            Err(ForwardError::Validation(msg)) => {
                log::warn!("⚠️  [{}] {}", execution_id, msg);
                ForwardResponse::error(msg)
            }
            Err(e) => {
                log::error!("❌ [{}] Error ({}): {}", execution_id, e.kind(), e);
                ForwardResponse::error(e.message())
            }
        }
    }

    async fn forward(&self, execution_id: &str, request: &ForwardRequest) -> Result<String, ForwardError> {
        self.step(execution_id, "📥 Parsing request body...");
        let user_id = request
            .user_id()
            .ok_or_else(|| ForwardError::Validation(MISSING_USER_ID.to_string()))?;
        self.step(execution_id, &format!("Received userId: {}", user_id));

        let (database_id, collection_id) = self
            .config
            .target()
            .ok_or_else(|| ForwardError::Validation(MISSING_TARGET.to_string()))?;

        let credential = self.config.credential_source.resolve(&self.config, request)?;

        self.step(
            execution_id,
            &format!("🔍 Fetching user document from DB: {}, Collection: {}...", database_id, collection_id),
        );
        let record = self
            .store
            .get_document(database_id, collection_id, &user_id, credential.as_deref())
            .await?;
        self.step(
            execution_id,
            &format!(
                "User document retrieved: {}",
                serde_json::to_string(&record).unwrap_or_default()
            ),
        );

        let payload = self.config.payload_shape.project(&record);

        let url = self
            .config
            .webhook_url
            .as_deref()
            .ok_or_else(|| ForwardError::Validation(MISSING_WEBHOOK.to_string()))?;

        self.step(execution_id, "📤 Sending data to webhook...");
        self.webhook.deliver(url, &payload).await?;

        Ok(user_id)
    }

    /// Step trace: `info` when verbose, `debug` otherwise.
    fn step(&self, execution_id: &str, message: &str) {
        if self.config.verbose {
            log::info!("[{}] {}", execution_id, message);
        } else {
            log::debug!("[{}] {}", execution_id, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForwardPayload, UserRecord};
    use crate::services::credentials::CredentialSource;
    use crate::services::projection::PayloadShape;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        records: HashMap<String, UserRecord>,
        calls: Mutex<Vec<(String, String, String, Option<String>)>>,
    }

    #[async_trait]
    impl DocumentStore for FakeStore {
        async fn get_document(
            &self,
            database_id: &str,
            collection_id: &str,
            document_id: &str,
            credential: Option<&str>,
        ) -> Result<UserRecord, ForwardError> {
            self.calls.lock().unwrap().push((
                database_id.to_string(),
                collection_id.to_string(),
                document_id.to_string(),
                credential.map(str::to_string),
            ));
            self.records.get(document_id).cloned().ok_or_else(|| {
                ForwardError::Lookup("Document with the requested ID could not be found.".to_string())
            })
        }
    }

    struct FakeWebhook {
        fail_with: Option<String>,
        delivered: Mutex<Vec<(String, ForwardPayload)>>,
    }

    impl FakeWebhook {
        fn ok() -> Self {
            Self { fail_with: None, delivered: Mutex::new(Vec::new()) }
        }

        fn failing(message: &str) -> Self {
            Self { fail_with: Some(message.to_string()), delivered: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl WebhookSink for FakeWebhook {
        async fn deliver(&self, url: &str, payload: &ForwardPayload) -> Result<(), ForwardError> {
            self.delivered.lock().unwrap().push((url.to_string(), payload.clone()));
            match &self.fail_with {
                Some(msg) => Err(ForwardError::Delivery(msg.clone())),
                None => Ok(()),
            }
        }
    }

    fn config() -> ForwarderConfig {
        ForwarderConfig {
            api_key: Some("env-key".to_string()),
            database_id: Some("db".to_string()),
            collection_id: Some("users".to_string()),
            webhook_url: Some("http://hook.local/x".to_string()),
            ..Default::default()
        }
    }

    fn store_with_u1() -> FakeStore {
        let mut records = HashMap::new();
        records.insert(
            "u1".to_string(),
            serde_json::from_value(json!({
                "$id": "u1",
                "name": "Ana",
                "email": "a@x.com",
                "phoneNo": "123",
                "District": "D1",
                "Class": "5"
            }))
            .unwrap(),
        );
        FakeStore { records, ..Default::default() }
    }

    fn forwarder(config: ForwarderConfig, store: &Arc<FakeStore>, webhook: &Arc<FakeWebhook>) -> RecordForwarder {
        RecordForwarder::new(config, store.clone(), webhook.clone())
    }

    fn body(json: &str) -> ForwardRequest {
        ForwardRequest::new(Some(json.to_string()))
    }

    #[tokio::test]
    async fn test_missing_user_id_makes_no_calls() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::ok());
        let forwarder = forwarder(config(), &store, &webhook);

        for request in [ForwardRequest::new(None), body(""), body("{oops"), body(r#"{"other":1}"#)] {
            let response = forwarder.handle(&request).await;
            assert_eq!(response, ForwardResponse::error(MISSING_USER_ID));
        }

        assert!(store.calls.lock().unwrap().is_empty());
        assert!(webhook.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_target_makes_no_calls() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::ok());
        let config = ForwarderConfig { collection_id: None, ..config() };
        let forwarder = forwarder(config, &store, &webhook);

        let response = forwarder.handle(&body(r#"{"userId":"u1"}"#)).await;

        assert_eq!(response, ForwardResponse::error(MISSING_TARGET));
        assert!(store.calls.lock().unwrap().is_empty());
        assert!(webhook.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forwards_plain_payload() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::ok());
        let forwarder = forwarder(config(), &store, &webhook);

        let response = forwarder.handle(&body(r#"{"userId":"u1"}"#)).await;
        assert_eq!(response, ForwardResponse::success("u1"));

        let calls = store.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("db".to_string(), "users".to_string(), "u1".to_string(), Some("env-key".to_string()))]
        );

        let delivered = webhook.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, "http://hook.local/x");
        assert_eq!(
            serde_json::to_value(&delivered[0].1).unwrap(),
            json!({ "email": "a@x.com", "phoneNo": "123", "District": "D1", "Class": "5" })
        );
    }

    #[tokio::test]
    async fn test_forwards_labeled_payload_with_header_credential() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::ok());
        let config = ForwarderConfig {
            payload_shape: PayloadShape::Labeled,
            credential_source: CredentialSource::Header("x-appwrite-key".to_string()),
            verbose: false,
            ..config()
        };
        let forwarder = forwarder(config, &store, &webhook);

        let request = body(r#"{"userId":"u1"}"#).with_header("X-Appwrite-Key", "caller-key");
        let response = forwarder.handle(&request).await;
        assert_eq!(response, ForwardResponse::success("u1"));

        assert_eq!(store.calls.lock().unwrap()[0].3.as_deref(), Some("caller-key"));
        assert_eq!(
            serde_json::to_value(&webhook.delivered.lock().unwrap()[0].1).unwrap(),
            json!({ "name": "Ana", "email": "a@x.com", "phoneNo": "123", "District": "D1", "Class": "Class 5" })
        );
    }

    #[tokio::test]
    async fn test_repeated_credential_header_makes_no_calls() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::ok());
        let config = ForwarderConfig {
            credential_source: CredentialSource::Header("x-appwrite-key".to_string()),
            ..config()
        };
        let forwarder = forwarder(config, &store, &webhook);

        let request = body(r#"{"userId":"u1"}"#)
            .with_header("x-appwrite-key", "one")
            .with_header("x-appwrite-key", "two");
        let response = forwarder.handle(&request).await;

        assert_eq!(
            response,
            ForwardResponse::error("Multiple x-appwrite-key headers in request")
        );
        assert!(store.calls.lock().unwrap().is_empty());
        assert!(webhook.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_skips_webhook() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::ok());
        let forwarder = forwarder(config(), &store, &webhook);

        let response = forwarder.handle(&body(r#"{"userId":"ghost"}"#)).await;

        assert_eq!(
            response,
            ForwardResponse::error("Document with the requested ID could not be found.")
        );
        assert_eq!(store.calls.lock().unwrap().len(), 1);
        assert!(webhook.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_failure_is_reported() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::failing("Webhook failed: Service Unavailable"));
        let forwarder = forwarder(config(), &store, &webhook);

        let response = forwarder.handle(&body(r#"{"userId":"u1"}"#)).await;

        match response {
            ForwardResponse::Failure { error } => assert!(error.contains("Service Unavailable")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_webhook_url_after_lookup() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::ok());
        let config = ForwarderConfig { webhook_url: None, ..config() };
        let forwarder = forwarder(config, &store, &webhook);

        let response = forwarder.handle(&body(r#"{"userId":"u1"}"#)).await;

        assert_eq!(response, ForwardResponse::error(MISSING_WEBHOOK));
        assert_eq!(store.calls.lock().unwrap().len(), 1);
        assert!(webhook.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_invocations_redeliver() {
        let store = Arc::new(store_with_u1());
        let webhook = Arc::new(FakeWebhook::ok());
        let forwarder = forwarder(config(), &store, &webhook);

        for _ in 0..3 {
            let response = forwarder.handle(&body(r#"{"userId":"u1"}"#)).await;
            assert!(response.is_success());
        }

        assert_eq!(store.calls.lock().unwrap().len(), 3);
        let delivered = webhook.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 3);
        assert!(delivered.iter().all(|(_, p)| p == &delivered[0].1));
    }
}
