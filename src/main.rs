mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_web::middleware::{Compress, Logger};
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use crate::config::{ForwarderConfig, StoreBackend};
use crate::services::{AppwriteStore, DocumentStore, HttpWebhook, RecordForwarder};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ForwarderConfig::from_env();

    log::info!("🚀 Starting Record Forwarder...");
    log::info!("🗄️  Store backend: {}", config.store_backend.as_str());
    log::info!("🔑 Credential source: {}", config.credential_source.as_str());
    log::info!("📦 Payload shape: {}", config.payload_shape.as_str());

    if config.target().is_none() {
        log::warn!("⚠️  DB_ID or COLLECTION_ID not set; every execution will be rejected");
    }
    if config.webhook_url.is_none() {
        log::warn!("⚠️  PABLY_WEBHOOK_URL not set; deliveries will fail");
    }

    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Appwrite => {
            log::info!("📊 Document store: {}", config.endpoint);
            Arc::new(AppwriteStore::new(http.clone(), &config.endpoint, config.project_id.clone()))
        }
        StoreBackend::MongoDB => {
            let db = database::MongoDB::new(&config.mongodb_uri)
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(db)
        }
    };

    let bind = format!("{}:{}", config.host, config.port);
    let forwarder = web::Data::new(RecordForwarder::new(
        config,
        store,
        Arc::new(HttpWebhook::new(http)),
    ));

    log::info!("🌐 Server starting on {}", bind);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(forwarder.clone())
            .wrap(Compress::default())
            .wrap(Logger::default())
            .configure(api::routes)
    })
    .bind(bind)?
    .run()
    .await
}
