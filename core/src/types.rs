//! Domain types for hotel bookings.
//!
//! Bookings are the only records this crate writes. Enrollments, tickets,
//! hotels and rooms belong to neighbouring subsystems and are read-only here;
//! they are modelled just far enough to answer "may this user book this room".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Declares an integer identifier newtype backed by an `INTEGER` column.
macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[doc = concat!("Wraps a raw database id as a `", stringify!($name), "`.")]
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the raw database id
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Identifier of an authenticated user
    UserId
);
integer_id!(
    /// Identifier of an enrollment (registration profile)
    EnrollmentId
);
integer_id!(
    /// Identifier of a purchased ticket
    TicketId
);
integer_id!(
    /// Identifier of a ticket type
    TicketTypeId
);
integer_id!(
    /// Identifier of a hotel
    HotelId
);
integer_id!(
    /// Identifier of a hotel room
    RoomId
);
integer_id!(
    /// Identifier of a booking
    BookingId
);

// ============================================================================
// Enrollment
// ============================================================================

/// Postal address attached to an enrollment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Postal code
    pub cep: String,
    /// Street name
    pub street: String,
    /// City
    pub city: String,
    /// State (two-letter code)
    pub state: String,
    /// House or building number
    pub number: String,
    /// Neighborhood
    pub neighborhood: String,
    /// Free-form complement (apartment, block, ...)
    pub address_detail: Option<String>,
}

/// A user's registration profile for the event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Enrollment ID
    pub id: EnrollmentId,
    /// Owning user
    pub user_id: UserId,
    /// Full name as registered
    pub name: String,
    /// Address, when one has been filled in
    pub address: Option<Address>,
    /// When the enrollment was created
    pub created_at: DateTime<Utc>,
    /// When the enrollment was last modified
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Tickets
// ============================================================================

/// Payment status of a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Ticket is held but not yet paid
    Reserved,
    /// Ticket has been paid
    Paid,
}

impl TicketStatus {
    /// Database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        }
    }

    /// Parse a status from its database representation.
    ///
    /// Returns `None` for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RESERVED" => Some(Self::Reserved),
            "PAID" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of ticket: whether it is remote-only and whether it includes a hotel stay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Ticket type ID
    pub id: TicketTypeId,
    /// Display name
    pub name: String,
    /// Price in the smallest currency unit
    pub price: i32,
    /// Remote-only attendance (no hotel possible)
    pub is_remote: bool,
    /// Hotel accommodation included
    pub includes_hotel: bool,
}

/// A purchased ticket together with its type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket ID
    pub id: TicketId,
    /// Enrollment the ticket was bought for
    pub enrollment_id: EnrollmentId,
    /// Payment status
    pub status: TicketStatus,
    /// The ticket's type
    pub ticket_type: TicketType,
    /// When the ticket was created
    pub created_at: DateTime<Utc>,
    /// When the ticket was last modified
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Rooms and bookings
// ============================================================================

/// A bookable room inside a hotel.
///
/// Serialized in camelCase because it is returned verbatim by `GET /booking`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room ID
    pub id: RoomId,
    /// Room name or number
    pub name: String,
    /// Maximum number of bookings
    pub capacity: i32,
    /// Hotel the room belongs to
    pub hotel_id: HotelId,
    /// When the room was created
    pub created_at: DateTime<Utc>,
    /// When the room was last modified
    pub updated_at: DateTime<Utc>,
}

/// Association between a user and a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking ID
    pub id: BookingId,
    /// Owner; never changes after creation
    pub user_id: UserId,
    /// Booked room; changed by an update
    pub room_id: RoomId,
    /// When the booking was created
    pub created_at: DateTime<Utc>,
    /// When the booking was last modified
    pub updated_at: DateTime<Utc>,
}

/// A room together with the bookings currently referencing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomOccupancy {
    /// The room
    pub room: Room,
    /// Bookings on the room
    pub bookings: Vec<Booking>,
}

impl RoomOccupancy {
    /// Number of bookings on the room.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.bookings.len()
    }

    /// Whether the room has no spare capacity left.
    ///
    /// A non-positive capacity is treated as full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        usize::try_from(self.room.capacity).map_or(true, |capacity| self.occupied() >= capacity)
    }
}

/// A booking with its room expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingWithRoom {
    /// The booking
    pub booking: Booking,
    /// The booked room
    pub room: Room,
}

/// What a user sees when reading their booking: the id and the full room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    /// Booking ID
    pub id: BookingId,
    /// The booked room
    #[serde(rename = "Room")]
    pub room: Room,
}

impl From<BookingWithRoom> for BookingDetails {
    fn from(value: BookingWithRoom) -> Self {
        Self {
            id: value.booking.id,
            room: value.room,
        }
    }
}

/// The facts that made a user eligible to book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eligibility {
    /// The user's enrollment
    pub enrollment: Enrollment,
    /// The paid, in-person, hotel-inclusive ticket
    pub ticket: Ticket,
}
