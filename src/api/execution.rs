use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::metrics;
use crate::models::{ForwardRequest, ForwardResponse};
use crate::services::RecordForwarder;

/// Documented execution body. The handler reads the raw bytes instead,
/// since a malformed body must still produce a JSON answer.
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct ExecutionBody {
    #[schema(rename = "userId")]
    pub user_id: String,
}

/// Copies the raw body and headers into a `ForwardRequest`.
/// Repeated headers keep every value; non-UTF-8 header values are dropped.
pub fn to_forward_request(req: &HttpRequest, body: &[u8]) -> ForwardRequest {
    let body = (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned());

    req.headers()
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
        .fold(ForwardRequest::new(body), |request, (name, value)| {
            request.with_header(name, value)
        })
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Forwarder",
    request_body(content = ExecutionBody, description = "User whose record should be forwarded"),
    responses(
        (status = 200, description = "Outcome of the execution; failures carry an `error` field", body = ForwardResponse)
    )
)]
pub async fn execute(
    req: HttpRequest,
    body: web::Bytes,
    forwarder: web::Data<RecordForwarder>,
) -> HttpResponse {
    metrics::increment_execution_count();

    let request = to_forward_request(&req, &body);
    let response = forwarder.handle(&request).await;

    if response.is_success() {
        metrics::increment_delivery_count();
    } else {
        metrics::increment_error_count();
    }

    HttpResponse::Ok().json(response)
}
