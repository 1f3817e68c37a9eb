//! Error types for booking operations.

use thiserror::Error;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Why a booking operation was refused.
///
/// Every reason maps to the same `Forbidden` outcome. The distinction exists
/// for logs and metrics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForbiddenReason {
    /// The user has no enrollment.
    NotEnrolled,
    /// The enrollment has no ticket.
    NoTicket,
    /// The ticket is reserved but not paid.
    TicketNotPaid,
    /// The ticket is for remote attendance.
    RemoteTicket,
    /// The ticket type does not include a hotel stay.
    HotelNotIncluded,
    /// The room has no spare capacity.
    RoomFull,
    /// The user already holds a booking.
    AlreadyBooked,
    /// The user has no booking to change.
    NoBooking,
    /// The booking being changed belongs to someone else.
    NotBookingOwner,
}

impl ForbiddenReason {
    /// Stable snake_case label, used as a metrics label value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotEnrolled => "not_enrolled",
            Self::NoTicket => "no_ticket",
            Self::TicketNotPaid => "ticket_not_paid",
            Self::RemoteTicket => "remote_ticket",
            Self::HotelNotIncluded => "hotel_not_included",
            Self::RoomFull => "room_full",
            Self::AlreadyBooked => "already_booked",
            Self::NoBooking => "no_booking",
            Self::NotBookingOwner => "not_booking_owner",
        }
    }
}

impl std::fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the booking core.
///
/// `NotFound` and `Forbidden` are the domain outcomes. `Store` carries any
/// persistence fault; the core never inspects or retries it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// A referenced room or booking does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Kind of record that was missing
        resource: &'static str,
    },

    /// The user may not perform this operation.
    #[error("Forbidden: {reason}")]
    Forbidden {
        /// Why the operation was refused
        reason: ForbiddenReason,
    },

    /// The backing store failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl BookingError {
    /// Shorthand for a missing room.
    #[must_use]
    pub const fn room_not_found() -> Self {
        Self::NotFound { resource: "Room" }
    }

    /// Shorthand for a missing booking.
    #[must_use]
    pub const fn booking_not_found() -> Self {
        Self::NotFound { resource: "Booking" }
    }

    /// Shorthand for a refusal.
    #[must_use]
    pub const fn forbidden(reason: ForbiddenReason) -> Self {
        Self::Forbidden { reason }
    }

    /// Whether this is a `NotFound` outcome.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this is a `Forbidden` outcome.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// The refusal reason, if this is a `Forbidden` outcome.
    #[must_use]
    pub const fn forbidden_reason(&self) -> Option<ForbiddenReason> {
        match self {
            Self::Forbidden { reason } => Some(*reason),
            _ => None,
        }
    }
}
