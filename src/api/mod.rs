pub mod execution;
pub mod health;
pub mod metrics;
pub mod swagger;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Route table shared by the server and the HTTP tests
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
            .url("/api-docs/openapi.json", swagger::ApiDoc::openapi()),
    )
    .route("/", web::post().to(execution::execute))
    .route("/health", web::get().to(health::health_check))
    .route("/metrics", web::get().to(metrics::get_metrics));
}
