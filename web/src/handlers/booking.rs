//! Booking endpoints.
//!
//! ```text
//! POST /booking              { "roomId": n }  → 200 { "bookingId": n }
//! GET  /booking                               → 200 { "id": n, "Room": { .. } }
//! PUT  /booking/:bookingId   { "roomId": n }  → 200 { "bookingId": n }
//! ```
//!
//! Every route requires a bearer token. `roomId` may be a JSON number or a
//! numeric string; it and `bookingId` must be positive integers or the
//! request is rejected with 400 before the booking rules run.

use crate::error::AppError;
use crate::extractors::AuthenticatedUser;
use crate::state::AppState;
use crate::WebResult;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use hotel_booking_core::{
    BookingDetails, BookingId, BookingRepository, EligibilityRepository, RoomId,
    SessionRepository,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for creating or moving a booking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    /// Target room; kept raw so strings and numbers both parse
    #[serde(default)]
    pub room_id: Option<Value>,
}

/// Response body for a successful write.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    /// ID of the created or moved booking
    pub booking_id: BookingId,
}

/// Parse a positive `i32` identifier from a JSON number or numeric string.
///
/// Whole numbers written in float or exponent form (`7.0`, `"7e0"`) are accepted.
fn positive_id(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_f64().and_then(positive_whole),
        Value::String(s) => positive_str(s),
        _ => None,
    }
}

fn positive_str(raw: &str) -> Option<i32> {
    raw.trim().parse::<f64>().ok().and_then(positive_whole)
}

#[allow(clippy::cast_possible_truncation)]
fn positive_whole(n: f64) -> Option<i32> {
    let whole = n.is_finite() && n.fract() == 0.0;
    (whole && (1.0..=f64::from(i32::MAX)).contains(&n)).then_some(n as i32)
}

fn parse_room_id(body: Result<Json<RoomRequest>, JsonRejection>) -> Result<RoomId, AppError> {
    let Json(request) = body.map_err(|rejection| {
        AppError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    request
        .room_id
        .as_ref()
        .and_then(positive_id)
        .map(RoomId::new)
        .ok_or_else(|| AppError::bad_request("roomId must be a positive integer"))
}

fn parse_booking_id(raw: &str) -> Result<BookingId, AppError> {
    positive_str(raw)
        .map(BookingId::new)
        .ok_or_else(|| AppError::bad_request("bookingId must be a positive integer"))
}

/// Book a room for the authenticated user.
///
/// # Errors
///
/// - 400 if `roomId` is missing or not a positive integer
/// - 403 if the user may not book or the room is full
/// - 404 if the room does not exist
pub async fn post_booking<B, L, S>(
    State(state): State<AppState<B, L, S>>,
    user: AuthenticatedUser,
    body: Result<Json<RoomRequest>, JsonRejection>,
) -> WebResult<Json<BookingCreated>>
where
    B: BookingRepository + 'static,
    L: EligibilityRepository + 'static,
    S: SessionRepository + 'static,
{
    let room_id = parse_room_id(body)?;

    let booking = state.bookings.post_booking(user.user_id, room_id).await?;
    crate::metrics::record_booking("create");

    Ok(Json(BookingCreated {
        booking_id: booking.id,
    }))
}

/// Get the authenticated user's booking.
///
/// # Errors
///
/// - 403 if the user may not hold a booking
/// - 404 if the user has no booking
pub async fn get_booking<B, L, S>(
    State(state): State<AppState<B, L, S>>,
    user: AuthenticatedUser,
) -> WebResult<Json<BookingDetails>>
where
    B: BookingRepository + 'static,
    L: EligibilityRepository + 'static,
    S: SessionRepository + 'static,
{
    let details = state.bookings.get_booking(user.user_id).await?;
    Ok(Json(details))
}

/// Move the authenticated user's booking to another room.
///
/// # Errors
///
/// - 400 if `bookingId` or `roomId` is not a positive integer
/// - 403 if the user may not book, the room is full, or the booking is not theirs
/// - 404 if the room does not exist
pub async fn update_booking<B, L, S>(
    State(state): State<AppState<B, L, S>>,
    user: AuthenticatedUser,
    Path(booking_id): Path<String>,
    body: Result<Json<RoomRequest>, JsonRejection>,
) -> WebResult<Json<BookingCreated>>
where
    B: BookingRepository + 'static,
    L: EligibilityRepository + 'static,
    S: SessionRepository + 'static,
{
    let booking_id = parse_booking_id(&booking_id)?;
    let room_id = parse_room_id(body)?;

    let booking = state
        .bookings
        .update_booking(room_id, user.user_id, booking_id)
        .await?;
    crate::metrics::record_booking("update");

    Ok(Json(BookingCreated {
        booking_id: booking.id,
    }))
}
