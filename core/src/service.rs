//! Eligibility and booking rules.
//!
//! # Operation order
//!
//! ```text
//! post_booking:    eligibility → room exists → room has space → user has no booking → insert
//! get_booking:     eligibility → user has a booking
//! update_booking:  eligibility → room exists → room has space → user owns booking_id → update
//! ```
//!
//! Eligibility is re-evaluated on every call and never cached.
//!
//! # Consistency
//!
//! Each operation reads, checks, then writes at most once, with no transaction
//! around the sequence. Two requests racing for the last slot of a room can
//! both pass the capacity check. Callers that need a hard guarantee must add
//! it in the store (a serializable transaction or a constraint).

use crate::error::{BookingError, ForbiddenReason, Result};
use crate::providers::{BookingRepository, EligibilityRepository};
use crate::types::{
    Booking, BookingDetails, BookingId, Eligibility, RoomId, RoomOccupancy, TicketStatus, UserId,
};
use std::sync::Arc;

/// Booking operations over injected repositories.
///
/// # Type Parameters
///
/// - `B`: booking and room accessors
/// - `L`: enrollment and ticket accessors
pub struct BookingService<B, L> {
    bookings: Arc<B>,
    eligibility: Arc<L>,
}

impl<B, L> Clone for BookingService<B, L> {
    fn clone(&self) -> Self {
        Self {
            bookings: Arc::clone(&self.bookings),
            eligibility: Arc::clone(&self.eligibility),
        }
    }
}

impl<B, L> BookingService<B, L>
where
    B: BookingRepository,
    L: EligibilityRepository,
{
    /// Creates a new `BookingService`.
    #[must_use]
    pub const fn new(bookings: Arc<B>, eligibility: Arc<L>) -> Self {
        Self {
            bookings,
            eligibility,
        }
    }

    /// Check that `user_id` may hold a hotel booking at all.
    ///
    /// The user needs an enrollment and a paid, in-person ticket whose type
    /// includes a hotel stay.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if any of those conditions fails
    /// - `Store` if a lookup fails
    #[tracing::instrument(skip(self))]
    pub async fn check_eligibility(&self, user_id: UserId) -> Result<Eligibility> {
        let Some(enrollment) = self
            .eligibility
            .find_enrollment_with_address(user_id)
            .await?
        else {
            return Err(deny(user_id, ForbiddenReason::NotEnrolled));
        };

        let Some(ticket) = self
            .eligibility
            .find_ticket_by_enrollment(enrollment.id)
            .await?
        else {
            return Err(deny(user_id, ForbiddenReason::NoTicket));
        };

        if ticket.status == TicketStatus::Reserved {
            return Err(deny(user_id, ForbiddenReason::TicketNotPaid));
        }
        if ticket.ticket_type.is_remote {
            return Err(deny(user_id, ForbiddenReason::RemoteTicket));
        }
        if !ticket.ticket_type.includes_hotel {
            return Err(deny(user_id, ForbiddenReason::HotelNotIncluded));
        }

        Ok(Eligibility { enrollment, ticket })
    }

    /// Check that `user_id` is eligible and that `room_id` exists and has space.
    ///
    /// Does not look at the user's existing booking.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not eligible or the room is full
    /// - `NotFound` if the room does not exist
    /// - `Store` if a lookup fails
    #[tracing::instrument(skip(self))]
    pub async fn pre_booking_check(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<RoomOccupancy> {
        self.check_eligibility(user_id).await?;

        let occupancy = self
            .bookings
            .find_room_with_bookings(room_id)
            .await?
            .ok_or_else(BookingError::room_not_found)?;

        if occupancy.is_full() {
            tracing::debug!(
                %room_id,
                capacity = occupancy.room.capacity,
                occupied = occupancy.occupied(),
                "Room has no spare capacity"
            );
            return Err(deny(user_id, ForbiddenReason::RoomFull));
        }

        Ok(occupancy)
    }

    /// Book `room_id` for `user_id`.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not eligible, the room is full, or the
    ///   user already holds a booking
    /// - `NotFound` if the room does not exist
    /// - `Store` if a lookup or the insert fails
    #[tracing::instrument(skip(self))]
    pub async fn post_booking(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        self.pre_booking_check(user_id, room_id).await?;

        if self.bookings.find_booking_by_user(user_id).await?.is_some() {
            return Err(deny(user_id, ForbiddenReason::AlreadyBooked));
        }

        let booking = self.bookings.create_booking(user_id, room_id).await?;
        tracing::info!(booking_id = %booking.id, %user_id, %room_id, "Booking created");
        Ok(booking)
    }

    /// Get the booking held by `user_id`.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not eligible
    /// - `NotFound` if the user has no booking
    /// - `Store` if a lookup fails
    #[tracing::instrument(skip(self))]
    pub async fn get_booking(&self, user_id: UserId) -> Result<BookingDetails> {
        self.check_eligibility(user_id).await?;

        self.bookings
            .find_booking_by_user(user_id)
            .await?
            .map(BookingDetails::from)
            .ok_or_else(BookingError::booking_not_found)
    }

    /// Move the booking `booking_id` of `user_id` to `room_id`.
    ///
    /// The target room's capacity counts every booking on it, including one
    /// the user may already hold there.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not eligible, the target room is full, the
    ///   user has no booking, or `booking_id` is not the user's booking
    /// - `NotFound` if the target room does not exist
    /// - `Store` if a lookup or the update fails
    #[tracing::instrument(skip(self))]
    pub async fn update_booking(
        &self,
        room_id: RoomId,
        user_id: UserId,
        booking_id: BookingId,
    ) -> Result<Booking> {
        self.pre_booking_check(user_id, room_id).await?;

        let Some(current) = self.bookings.find_booking_by_user(user_id).await? else {
            return Err(deny(user_id, ForbiddenReason::NoBooking));
        };
        if current.booking.id != booking_id {
            return Err(deny(user_id, ForbiddenReason::NotBookingOwner));
        }

        let booking = self.bookings.update_booking_room(booking_id, room_id).await?;
        tracing::info!(
            %booking_id,
            %user_id,
            from_room = %current.booking.room_id,
            to_room = %room_id,
            "Booking moved"
        );
        Ok(booking)
    }
}

fn deny(user_id: UserId, reason: ForbiddenReason) -> BookingError {
    tracing::warn!(%user_id, %reason, "Booking operation refused");
    BookingError::forbidden(reason)
}
