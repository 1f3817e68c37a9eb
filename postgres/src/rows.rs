//! Row shapes returned by the queries, and their conversion to domain types.

use chrono::{DateTime, Utc};
use hotel_booking_core::{
    Address, Booking, BookingError, BookingId, BookingWithRoom, Enrollment, EnrollmentId, HotelId,
    Result, Room, RoomId, Ticket, TicketId, TicketStatus, TicketType, TicketTypeId, UserId,
};

pub(crate) const BOOKING_COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";
pub(crate) const ROOM_COLUMNS: &str = "id, name, capacity, hotel_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
pub(crate) struct BookingRow {
    id: i32,
    user_id: i32,
    room_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: BookingId::new(row.id),
            user_id: UserId::new(row.user_id),
            room_id: RoomId::new(row.room_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct RoomRow {
    id: i32,
    name: String,
    capacity: i32,
    hotel_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: RoomId::new(row.id),
            name: row.name,
            capacity: row.capacity,
            hotel_id: HotelId::new(row.hotel_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A booking joined with its room; room columns carry a `room_` prefix.
#[derive(sqlx::FromRow)]
pub(crate) struct BookingWithRoomRow {
    id: i32,
    user_id: i32,
    room_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    room_name: String,
    room_capacity: i32,
    room_hotel_id: i32,
    room_created_at: DateTime<Utc>,
    room_updated_at: DateTime<Utc>,
}

impl From<BookingWithRoomRow> for BookingWithRoom {
    fn from(row: BookingWithRoomRow) -> Self {
        Self {
            room: Room {
                id: RoomId::new(row.room_id),
                name: row.room_name,
                capacity: row.room_capacity,
                hotel_id: HotelId::new(row.room_hotel_id),
                created_at: row.room_created_at,
                updated_at: row.room_updated_at,
            },
            booking: Booking {
                id: BookingId::new(row.id),
                user_id: UserId::new(row.user_id),
                room_id: RoomId::new(row.room_id),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

/// An enrollment left-joined with its address.
#[derive(sqlx::FromRow)]
pub(crate) struct EnrollmentRow {
    id: i32,
    user_id: i32,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cep: Option<String>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    number: Option<String>,
    neighborhood: Option<String>,
    address_detail: Option<String>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        let address = match (
            row.cep,
            row.street,
            row.city,
            row.state,
            row.number,
            row.neighborhood,
        ) {
            (Some(cep), Some(street), Some(city), Some(state), Some(number), Some(neighborhood)) => {
                Some(Address {
                    cep,
                    street,
                    city,
                    state,
                    number,
                    neighborhood,
                    address_detail: row.address_detail,
                })
            }
            _ => None,
        };

        Self {
            id: EnrollmentId::new(row.id),
            user_id: UserId::new(row.user_id),
            name: row.name,
            address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A ticket joined with its ticket type.
#[derive(sqlx::FromRow)]
pub(crate) struct TicketRow {
    id: i32,
    enrollment_id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    ticket_type_id: i32,
    ticket_type_name: String,
    price: i32,
    is_remote: bool,
    includes_hotel: bool,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = BookingError;

    fn try_from(row: TicketRow) -> Result<Self> {
        let status = TicketStatus::parse(&row.status).ok_or_else(|| {
            BookingError::Store(format!(
                "ticket {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;

        Ok(Self {
            id: TicketId::new(row.id),
            enrollment_id: EnrollmentId::new(row.enrollment_id),
            status,
            ticket_type: TicketType {
                id: TicketTypeId::new(row.ticket_type_id),
                name: row.ticket_type_name,
                price: row.price,
                is_remote: row.is_remote,
                includes_hotel: row.includes_hotel,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
