use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static WORKSHOPS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "workshop_admin_workshops_created_total",
        "Total workshops created"
    )
    .expect("register workshops_created_total")
});

pub static BOOKINGS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "workshop_admin_bookings_created_total",
        "Total booking transactions created"
    )
    .expect("register bookings_created_total")
});

pub static SOFT_DELETES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "workshop_admin_soft_deletes_total",
        "Total records moved to trash",
        &["resource"]
    )
    .expect("register soft_deletes_total")
});

pub static UPLOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "workshop_admin_uploads_total",
        "Total images stored",
        &["slot"]
    )
    .expect("register uploads_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
