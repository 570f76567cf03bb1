use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use std::error::Error;

use crate::models::UserRecord;
use crate::services::document_store::DocumentStore;
use crate::utils::ForwardError;

/// MongoDB-backed document store. `DB_ID` selects the database,
/// `COLLECTION_ID` the collection, and the user id matches `_id`.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // One point-read per execution; a small pool is plenty
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(1);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Test connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        Ok(Self { client })
    }

    pub fn collection(&self, database_id: &str, collection_id: &str) -> Collection<UserRecord> {
        self.client.database(database_id).collection(collection_id)
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        _credential: Option<&str>,
    ) -> Result<UserRecord, ForwardError> {
        self.collection(database_id, collection_id)
            .find_one(doc! { "_id": document_id })
            .await
            .map_err(|e| ForwardError::Lookup(format!("Database error: {}", e)))?
            .ok_or_else(|| {
                ForwardError::Lookup(format!(
                    "Document '{}' not found in {}.{}",
                    document_id, database_id, collection_id
                ))
            })
    }
}
