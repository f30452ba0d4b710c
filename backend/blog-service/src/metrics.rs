//! Prometheus metrics for blog-service.
//!
//! Exposes moderation counters and an HTTP handler for the `/metrics`
//! endpoint.

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

/// Single-comment moderation transitions by action.
static MODERATION_TRANSITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "blog_moderation_transitions_total",
        "Comment moderation transitions segmented by action",
        &["action"]
    )
    .expect("failed to register blog_moderation_transitions_total")
});

/// Comments changed by bulk moderation operations, by action.
static BULK_MODERATION_AFFECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "blog_bulk_moderation_affected_total",
        "Comments changed by bulk moderation operations segmented by action",
        &["action"]
    )
    .expect("failed to register blog_bulk_moderation_affected_total")
});

pub fn record_transition(action: &str) {
    MODERATION_TRANSITIONS.with_label_values(&[action]).inc();
}

pub fn record_bulk_transition(action: &str, affected: u64) {
    BULK_MODERATION_AFFECTED
        .with_label_values(&[action])
        .inc_by(affected);
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
