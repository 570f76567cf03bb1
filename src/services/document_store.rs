// ==================== DOCUMENT STORE ====================
// Point-read of a single user document by id. The forwarder only ever
// reads; nothing in this crate writes to the store.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::UserRecord;
use crate::utils::ForwardError;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `getDocument(databaseId, collectionId, documentId)`.
    ///
    /// `credential` is whatever the credential strategy resolved; backends
    /// that authenticate differently may ignore it.
    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        credential: Option<&str>,
    ) -> Result<UserRecord, ForwardError>;
}

/// Error body returned by the Appwrite REST API
#[derive(Debug, Deserialize)]
struct AppwriteErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<u16>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Appwrite Databases REST backend.
#[derive(Clone)]
pub struct AppwriteStore {
    client: reqwest::Client,
    endpoint: String,
    project_id: Option<String>,
}

impl AppwriteStore {
    pub fn new(client: reqwest::Client, endpoint: &str, project_id: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
        }
    }

    pub fn document_url(&self, database_id: &str, collection_id: &str, document_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents/{}",
            self.endpoint,
            urlencoding::encode(database_id),
            urlencoding::encode(collection_id),
            urlencoding::encode(document_id),
        )
    }
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        credential: Option<&str>,
    ) -> Result<UserRecord, ForwardError> {
        let url = self.document_url(database_id, collection_id, document_id);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json");

        if let Some(project) = &self.project_id {
            request = request.header("X-Appwrite-Project", project);
        }
        if let Some(key) = credential {
            request = request.header("X-Appwrite-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ForwardError::Lookup(format!("Failed to reach document store: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Document store responded {}: {}", status, body);

            let message = serde_json::from_str::<AppwriteErrorBody>(&body)
                .ok()
                .and_then(|err| {
                    log::debug!("   Appwrite error code={:?} type={:?}", err.code, err.kind);
                    err.message
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or(status.as_str())
                        .to_string()
                });

            return Err(ForwardError::Lookup(message));
        }

        response
            .json::<UserRecord>()
            .await
            .map_err(|e| ForwardError::Lookup(format!("Failed to parse user document: {}", e)))
    }
}
