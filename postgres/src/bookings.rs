use crate::rows::{BOOKING_COLUMNS, BookingRow, BookingWithRoomRow, ROOM_COLUMNS, RoomRow};
use crate::{PostgresBookingStore, store_error};
use hotel_booking_core::{
    Booking, BookingError, BookingId, BookingRepository, BookingWithRoom, Result, RoomId,
    RoomOccupancy, UserId,
};

impl BookingRepository for PostgresBookingStore {
    #[tracing::instrument(skip(self))]
    async fn create_booking(&self, user_id: UserId, room_id: RoomId) -> Result<Booking> {
        let row: BookingRow = sqlx::query_as(&format!(
            "INSERT INTO bookings (user_id, room_id) VALUES ($1, $2) RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(user_id.get())
        .bind(room_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error("insert booking"))?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn find_room_with_bookings(&self, room_id: RoomId) -> Result<Option<RoomOccupancy>> {
        let room: Option<RoomRow> =
            sqlx::query_as(&format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"))
                .bind(room_id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(store_error("query room"))?;

        let Some(room) = room else {
            return Ok(None);
        };

        let bookings: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = $1 ORDER BY id"
        ))
        .bind(room_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error("query room bookings"))?;

        Ok(Some(RoomOccupancy {
            room: room.into(),
            bookings: bookings.into_iter().map(Booking::from).collect(),
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn find_booking_by_user(&self, user_id: UserId) -> Result<Option<BookingWithRoom>> {
        let row: Option<BookingWithRoomRow> = sqlx::query_as(
            r"
            SELECT b.id, b.user_id, b.room_id, b.created_at, b.updated_at,
                   r.name AS room_name, r.capacity AS room_capacity,
                   r.hotel_id AS room_hotel_id, r.created_at AS room_created_at,
                   r.updated_at AS room_updated_at
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            WHERE b.user_id = $1
            ORDER BY b.id
            LIMIT 1
            ",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("query user booking"))?;

        Ok(row.map(BookingWithRoom::from))
    }

    #[tracing::instrument(skip(self))]
    async fn update_booking_room(&self, booking_id: BookingId, room_id: RoomId) -> Result<Booking> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "UPDATE bookings SET room_id = $2, updated_at = now() WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking_id.get())
        .bind(room_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("update booking"))?;

        row.map(Booking::from)
            .ok_or_else(|| BookingError::Store(format!("booking {booking_id} does not exist")))
    }
}
