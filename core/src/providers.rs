//! Persistence traits consumed by the booking core.
//!
//! The core never talks to a database directly. Each collaborator is a trait
//! injected into [`crate::BookingService`]; production code uses the
//! PostgreSQL implementations, tests use the in-memory mock store.
//!
//! All methods return `Send` futures so callers can run them on any tokio
//! worker. Implementations report every failure as [`BookingError::Store`].
//!
//! [`BookingError::Store`]: crate::error::BookingError::Store

use crate::error::Result;
use crate::types::{
    Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, RoomId, RoomOccupancy, Ticket,
    UserId,
};
use std::future::Future;

/// Booking and room accessors.
///
/// This is the only write path for bookings.
pub trait BookingRepository: Send + Sync {
    /// Insert a booking for `user_id` on `room_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails.
    fn create_booking(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Booking>> + Send;

    /// Get a room with every booking that references it.
    ///
    /// # Returns
    ///
    /// `None` if the room does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_room_with_bookings(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Option<RoomOccupancy>>> + Send;

    /// Get the booking held by `user_id`, with its room expanded.
    ///
    /// # Returns
    ///
    /// `None` if the user has no booking.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_booking_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<BookingWithRoom>>> + Send;

    /// Point an existing booking at a different room.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails or the booking no longer exists.
    fn update_booking_room(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Booking>> + Send;
}

/// Read-only accessors for the facts that decide eligibility.
///
/// Enrollments and tickets are owned by other subsystems.
pub trait EligibilityRepository: Send + Sync {
    /// Get the enrollment of `user_id`, with its address.
    ///
    /// # Returns
    ///
    /// `None` if the user never enrolled.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_enrollment_with_address(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Enrollment>>> + Send;

    /// Get the ticket bought for an enrollment, with its ticket type.
    ///
    /// # Returns
    ///
    /// `None` if no ticket exists.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> impl Future<Output = Result<Option<Ticket>>> + Send;
}

/// Session lookup used by the HTTP layer to authenticate requests.
pub trait SessionRepository: Send + Sync {
    /// Resolve a bearer token to the user it was issued to.
    ///
    /// # Returns
    ///
    /// `None` if no session exists for the token.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    fn find_user_by_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<UserId>>> + Send;
}
