use std::env;

use crate::services::credentials::CredentialSource;
use crate::services::projection::PayloadShape;

/// Which document store backend serves the point-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Appwrite,
    MongoDB,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "appwrite" => Some(StoreBackend::Appwrite),
            "mongodb" | "mongo" => Some(StoreBackend::MongoDB),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Appwrite => "appwrite",
            StoreBackend::MongoDB => "mongodb",
        }
    }
}

/// Everything the forwarder needs, resolved once at startup.
///
/// Database, collection and webhook settings stay optional here: their
/// absence is reported per execution, not at boot.
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    pub endpoint: String,
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    pub webhook_url: Option<String>,
    pub credential_source: CredentialSource,
    pub payload_shape: PayloadShape,
    pub verbose: bool,
    pub store_backend: StoreBackend,
    pub mongodb_uri: String,
    pub host: String,
    pub port: String,
}

const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
const DEFAULT_CREDENTIAL_HEADER: &str = "x-appwrite-key";

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: None,
            api_key: None,
            database_id: None,
            collection_id: None,
            webhook_url: None,
            credential_source: CredentialSource::Env,
            payload_shape: PayloadShape::Plain,
            verbose: true,
            store_backend: StoreBackend::Appwrite,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            host: "0.0.0.0".to_string(),
            port: "3000".to_string(),
        }
    }
}

impl ForwarderConfig {
    /// Reads the process environment (call `dotenv().ok()` first).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let credential_source = match get("CREDENTIAL_SOURCE").as_deref() {
            Some(value) if value.eq_ignore_ascii_case("header") => CredentialSource::Header(
                get("CREDENTIAL_HEADER").unwrap_or_else(|| DEFAULT_CREDENTIAL_HEADER.to_string()),
            ),
            Some(value) if !value.eq_ignore_ascii_case("env") => {
                log::warn!("⚠️  Unknown CREDENTIAL_SOURCE '{}', falling back to env", value);
                CredentialSource::Env
            }
            _ => CredentialSource::Env,
        };

        let payload_shape = match get("PAYLOAD_SHAPE") {
            Some(value) => PayloadShape::parse(&value).unwrap_or_else(|| {
                log::warn!("⚠️  Unknown PAYLOAD_SHAPE '{}', falling back to plain", value);
                PayloadShape::Plain
            }),
            None => defaults.payload_shape,
        };

        let store_backend = match get("STORE_BACKEND") {
            Some(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                log::warn!("⚠️  Unknown STORE_BACKEND '{}', falling back to appwrite", value);
                StoreBackend::Appwrite
            }),
            None => defaults.store_backend,
        };

        let verbose = get("VERBOSE_LOGGING")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(defaults.verbose);

        Self {
            endpoint: get("APPWRITE_FUNCTION_API_ENDPOINT").unwrap_or(defaults.endpoint),
            project_id: get("APPWRITE_FUNCTION_PROJECT_ID"),
            api_key: get("APPWRITE_FUNCTION_API_KEY"),
            database_id: get("DB_ID"),
            collection_id: get("COLLECTION_ID"),
            webhook_url: get("PABLY_WEBHOOK_URL"),
            credential_source,
            payload_shape,
            verbose,
            store_backend,
            mongodb_uri: get("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT").unwrap_or(defaults.port),
        }
    }

    /// Database and collection ids, only when both are configured.
    pub fn target(&self) -> Option<(&str, &str)> {
        match (self.database_id.as_deref(), self.collection_id.as_deref()) {
            (Some(db), Some(collection)) => Some((db, collection)),
            _ => None,
        }
    }
}
