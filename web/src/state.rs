//! Application state for Axum handlers.

use hotel_booking_core::BookingService;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// # Type Parameters
///
/// - `B`: booking and room accessors
/// - `L`: eligibility accessors
/// - `S`: session lookup used to authenticate requests
///
/// # Examples
///
/// ```ignore
/// let store = Arc::new(PostgresBookingStore::new(pool));
/// let state = AppState::new(
///     BookingService::new(Arc::clone(&store), Arc::clone(&store)),
///     store,
/// );
/// let app = build_router(state);
/// ```
pub struct AppState<B, L, S> {
    /// Booking rules
    pub bookings: BookingService<B, L>,
    /// Bearer token lookup
    pub sessions: Arc<S>,
}

impl<B, L, S> Clone for AppState<B, L, S> {
    fn clone(&self) -> Self {
        Self {
            bookings: self.bookings.clone(),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<B, L, S> AppState<B, L, S> {
    /// Create a new application state.
    #[must_use]
    pub const fn new(bookings: BookingService<B, L>, sessions: Arc<S>) -> Self {
        Self { bookings, sessions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone_without_clone_providers() {
        struct Opaque;
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState<Opaque, Opaque, Opaque>>();
    }
}
