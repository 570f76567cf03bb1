use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Record Forwarder",
        version = "0.1.0",
        description = "Fetches a user document by `userId` and forwards a projection of it to a webhook.\n\n**Responses:** every execution answers HTTP 200; failures carry an `error` field.\n\n**Credentials:** in header mode the document store key is read from `x-appwrite-key` and passed through unchanged."
    ),
    paths(
        crate::api::execution::execute,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::api::execution::ExecutionBody,
            crate::models::ForwardResponse,
            crate::models::ForwardPayload,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Forwarder", description = "Record lookup and webhook delivery."),
        (name = "Health", description = "Health check and counters for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "appwrite_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-appwrite-key"))),
            );
        }
    }
}
