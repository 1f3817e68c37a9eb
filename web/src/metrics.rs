//! Booking metrics.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `hotel_booking_bookings_total{operation}` - Successful writes (`create`, `update`)
//! - `hotel_booking_denied_total{reason}` - Refused operations by reason
//! - `hotel_booking_requests_total{route,status}` - HTTP responses by route and status
//! - `hotel_booking_store_errors_total{operation}` - Failed store queries

use hotel_booking_core::ForbiddenReason;
use metrics::describe_counter;

/// Register metric descriptions.
///
/// Call once at startup, after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "hotel_booking_bookings_total",
        "Total number of successful booking writes by operation (create, update)"
    );
    describe_counter!(
        "hotel_booking_denied_total",
        "Total number of refused booking operations by reason"
    );
    describe_counter!(
        "hotel_booking_requests_total",
        "Total number of HTTP responses by route and status"
    );
    describe_counter!(
        "hotel_booking_store_errors_total",
        "Total number of failed store queries by operation"
    );

    tracing::info!("Booking metrics registered");
}

/// Count a successful booking write.
pub fn record_booking(operation: &'static str) {
    metrics::counter!("hotel_booking_bookings_total", "operation" => operation).increment(1);
}

/// Count a refused operation.
pub fn record_denied(reason: ForbiddenReason) {
    metrics::counter!("hotel_booking_denied_total", "reason" => reason.as_str()).increment(1);
}

/// Count an HTTP response.
pub fn record_request(route: String, status: u16) {
    metrics::counter!(
        "hotel_booking_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}
