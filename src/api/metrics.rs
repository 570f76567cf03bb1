use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static EXECUTION_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static DELIVERY_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_execution_count() {
    EXECUTION_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_delivery_count() {
    DELIVERY_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub forwarder_executions_total: u64,
    pub forwarder_errors_total: u64,
    pub forwarder_deliveries_total: u64,
}

pub fn snapshot() -> MetricsResponse {
    MetricsResponse {
        forwarder_executions_total: EXECUTION_COUNT.load(Ordering::Relaxed),
        forwarder_errors_total: ERROR_COUNT.load(Ordering::Relaxed),
        forwarder_deliveries_total: DELIVERY_COUNT.load(Ordering::Relaxed),
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text counters", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let m = snapshot();

    let metrics = format!(
        "# HELP forwarder_executions_total Total number of handler executions\n\
         # TYPE forwarder_executions_total counter\n\
         forwarder_executions_total {}\n\
         \n\
         # HELP forwarder_errors_total Executions that answered with an error\n\
         # TYPE forwarder_errors_total counter\n\
         forwarder_errors_total {}\n\
         \n\
         # HELP forwarder_deliveries_total Payloads accepted by the webhook\n\
         # TYPE forwarder_deliveries_total counter\n\
         forwarder_deliveries_total {}\n",
        m.forwarder_executions_total, m.forwarder_errors_total, m.forwarder_deliveries_total
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}
