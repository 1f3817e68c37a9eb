//! Axum HTTP surface for the hotel booking service.
//!
//! # Request Flow
//!
//! 1. **Track**: correlation ID assigned, `http_request` span opened
//! 2. **Authenticate**: bearer token resolved to a user ([`AuthenticatedUser`])
//! 3. **Validate**: `roomId` / `bookingId` must be positive integers (400 otherwise)
//! 4. **Apply rules**: [`BookingService`] checks eligibility and capacity
//! 5. **Map result**: [`AppError`] turns `NotFound` / `Forbidden` / store faults
//!    into 404 / 403 / 500
//!
//! # Example
//!
//! ```ignore
//! use hotel_booking_web::{AppState, build_router};
//!
//! let store = Arc::new(PostgresBookingStore::new(pool));
//! let state = AppState::new(BookingService::new(Arc::clone(&store), Arc::clone(&store)), store);
//! axum::serve(listener, build_router(state)).await?;
//! ```
//!
//! [`BookingService`]: hotel_booking_core::BookingService

#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::AppError;
pub use extractors::{AuthenticatedUser, BearerToken, CorrelationId};
pub use middleware::{CORRELATION_ID_HEADER, request_tracking_layer};
pub use router::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
