//! Router configuration.

use crate::handlers::{get_booking, health_check, post_booking, update_booking};
use crate::middleware::request_tracking_layer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};
use hotel_booking_core::{BookingRepository, EligibilityRepository, SessionRepository};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `GET /health` (no authentication)
/// - `POST /booking`, `GET /booking`, `PUT /booking/:bookingId`
///
/// Every route runs inside the request tracking layer and `tower-http`'s
/// `TraceLayer`.
pub fn build_router<B, L, S>(state: AppState<B, L, S>) -> Router
where
    B: BookingRepository + 'static,
    L: EligibilityRepository + 'static,
    S: SessionRepository + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/booking",
            get(get_booking::<B, L, S>).post(post_booking::<B, L, S>),
        )
        .route("/booking/:bookingId", put(update_booking::<B, L, S>))
        .layer(request_tracking_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
