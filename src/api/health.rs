use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::RecordForwarder;

/// Liveness plus the wiring this instance was started with
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub store_backend: String,
    pub credential_source: String,
    pub payload_shape: String,
    /// false when DB_ID/COLLECTION_ID or the webhook URL is missing
    pub configured: bool,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(forwarder: web::Data<RecordForwarder>) -> impl Responder {
    let config = forwarder.config();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store_backend: config.store_backend.as_str().to_string(),
        credential_source: config.credential_source.as_str().to_string(),
        payload_shape: config.payload_shape.as_str().to_string(),
        configured: config.target().is_some() && config.webhook_url.is_some(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
