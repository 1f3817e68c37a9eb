//! In-memory booking store for tests.
//!
//! Implements [`BookingRepository`], [`EligibilityRepository`] and
//! [`SessionRepository`] over plain collections, plus fixture builders that
//! write records directly (bypassing the booking rules) to arrange scenarios.

use crate::mocks::test_clock;
use hotel_booking_core::environment::Clock;
use hotel_booking_core::error::{BookingError, Result};
use hotel_booking_core::providers::{BookingRepository, EligibilityRepository, SessionRepository};
use hotel_booking_core::types::{
    Address, Booking, BookingId, BookingWithRoom, Enrollment, EnrollmentId, HotelId, Room, RoomId,
    RoomOccupancy, Ticket, TicketId, TicketStatus, TicketType, TicketTypeId, UserId,
};
use std::collections::{BTreeMap, HashMap};
use std::future::{Future, ready};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Tables {
    last_id: i32,
    users: Vec<UserId>,
    sessions: HashMap<String, UserId>,
    enrollments: BTreeMap<EnrollmentId, Enrollment>,
    ticket_types: BTreeMap<TicketTypeId, TicketType>,
    tickets: BTreeMap<TicketId, Ticket>,
    hotels: BTreeMap<HotelId, String>,
    rooms: BTreeMap<RoomId, Room>,
    bookings: BTreeMap<BookingId, Booking>,
    unavailable: bool,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(BookingError::Store("mock store unavailable".to_string()));
        }
        Ok(())
    }
}

/// Mock booking store.
///
/// Uses in-memory storage for testing. Clones share the same tables.
#[derive(Clone)]
pub struct MockBookingStore {
    tables: Arc<Mutex<Tables>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for MockBookingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBookingStore")
            .field("tables", &self.tables)
            .finish_non_exhaustive()
    }
}

impl MockBookingStore {
    /// Create an empty store stamped by [`test_clock`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(test_clock()))
    }

    /// Create an empty store stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock,
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every accessor fail with a store error until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.tables().unavailable = unavailable;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Fixtures
    // ═══════════════════════════════════════════════════════════════════════

    /// Register a user.
    pub fn create_user(&self) -> UserId {
        let mut tables = self.tables();
        let user_id = UserId::new(tables.next_id());
        tables.users.push(user_id);
        user_id
    }

    /// Open a session for `user_id` and return its bearer token.
    pub fn create_session(&self, user_id: UserId) -> String {
        let mut tables = self.tables();
        let token = format!("session-{}-{}", user_id, tables.next_id());
        tables.sessions.insert(token.clone(), user_id);
        token
    }

    /// Enroll `user_id` with a filled-in address.
    pub fn create_enrollment_with_address(&self, user_id: UserId) -> Enrollment {
        let now = self.clock.now();
        let mut tables = self.tables();
        let enrollment = Enrollment {
            id: EnrollmentId::new(tables.next_id()),
            user_id,
            name: format!("Attendee {user_id}"),
            address: Some(Address {
                cep: "01310-100".to_string(),
                street: "Avenida Paulista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
                number: "1000".to_string(),
                neighborhood: "Bela Vista".to_string(),
                address_detail: None,
            }),
            created_at: now,
            updated_at: now,
        };
        tables.enrollments.insert(enrollment.id, enrollment.clone());
        enrollment
    }

    /// Add a ticket type with the given flags.
    pub fn create_ticket_type(&self, is_remote: bool, includes_hotel: bool) -> TicketType {
        let mut tables = self.tables();
        let ticket_type = TicketType {
            id: TicketTypeId::new(tables.next_id()),
            name: match (is_remote, includes_hotel) {
                (true, _) => "Online".to_string(),
                (false, true) => "In person + hotel".to_string(),
                (false, false) => "In person".to_string(),
            },
            price: if includes_hotel { 600 } else { 250 },
            is_remote,
            includes_hotel,
        };
        tables.ticket_types.insert(ticket_type.id, ticket_type.clone());
        ticket_type
    }

    /// Add an in-person ticket type that includes a hotel stay.
    pub fn create_ticket_type_with_hotel(&self) -> TicketType {
        self.create_ticket_type(false, true)
    }

    /// Add a remote-only ticket type.
    pub fn create_ticket_type_remote(&self) -> TicketType {
        self.create_ticket_type(true, false)
    }

    /// Add an in-person ticket type without a hotel stay.
    pub fn create_ticket_type_without_hotel(&self) -> TicketType {
        self.create_ticket_type(false, false)
    }

    /// Issue a ticket of `ticket_type` for an enrollment.
    pub fn create_ticket(
        &self,
        enrollment_id: EnrollmentId,
        ticket_type: &TicketType,
        status: TicketStatus,
    ) -> Ticket {
        let now = self.clock.now();
        let mut tables = self.tables();
        let ticket = Ticket {
            id: TicketId::new(tables.next_id()),
            enrollment_id,
            status,
            ticket_type: ticket_type.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.tickets.insert(ticket.id, ticket.clone());
        ticket
    }

    /// Change the status of an issued ticket.
    pub fn set_ticket_status(&self, ticket_id: TicketId, status: TicketStatus) {
        if let Some(ticket) = self.tables().tickets.get_mut(&ticket_id) {
            ticket.status = status;
        }
    }

    /// Register a user who may book: enrolled, with a paid hotel ticket.
    pub fn eligible_user(&self) -> UserId {
        let user_id = self.create_user();
        let enrollment = self.create_enrollment_with_address(user_id);
        let ticket_type = self.create_ticket_type_with_hotel();
        self.create_ticket(enrollment.id, &ticket_type, TicketStatus::Paid);
        user_id
    }

    /// Add a hotel.
    pub fn create_hotel(&self) -> HotelId {
        let mut tables = self.tables();
        let hotel_id = HotelId::new(tables.next_id());
        tables.hotels.insert(hotel_id, format!("Hotel {hotel_id}"));
        hotel_id
    }

    /// Add a room with `capacity` places to a hotel.
    pub fn create_room(&self, hotel_id: HotelId, capacity: i32) -> Room {
        let now = self.clock.now();
        let mut tables = self.tables();
        let id = RoomId::new(tables.next_id());
        let room = Room {
            id,
            name: (100 + id.get()).to_string(),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        };
        tables.rooms.insert(room.id, room.clone());
        room
    }

    /// Add a single-occupancy room to a hotel.
    pub fn create_unitary_room(&self, hotel_id: HotelId) -> Room {
        self.create_room(hotel_id, 1)
    }

    /// Write a booking directly, without any eligibility or capacity check.
    pub fn insert_booking(&self, user_id: UserId, room_id: RoomId) -> Booking {
        let now = self.clock.now();
        let mut tables = self.tables();
        insert_booking_row(&mut tables, user_id, room_id, now)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════════

    /// Number of booking rows.
    #[must_use]
    pub fn booking_count(&self) -> usize {
        self.tables().bookings.len()
    }

    /// Every booking row owned by `user_id`.
    #[must_use]
    pub fn bookings_of(&self, user_id: UserId) -> Vec<Booking> {
        self.tables()
            .bookings
            .values()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Every booking row referencing `room_id`.
    #[must_use]
    pub fn bookings_in(&self, room_id: RoomId) -> Vec<Booking> {
        self.tables()
            .bookings
            .values()
            .filter(|booking| booking.room_id == room_id)
            .cloned()
            .collect()
    }
}

impl Default for MockBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_booking_row(
    tables: &mut Tables,
    user_id: UserId,
    room_id: RoomId,
    now: chrono::DateTime<chrono::Utc>,
) -> Booking {
    let booking = Booking {
        id: BookingId::new(tables.next_id()),
        user_id,
        room_id,
        created_at: now,
        updated_at: now,
    };
    tables.bookings.insert(booking.id, booking.clone());
    booking
}

impl BookingRepository for MockBookingStore {
    fn create_booking(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Booking>> + Send {
        let now = self.clock.now();
        let mut tables = self.tables();
        let result = tables
            .check_available()
            .map(|()| insert_booking_row(&mut tables, user_id, room_id, now));
        ready(result)
    }

    fn find_room_with_bookings(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Option<RoomOccupancy>>> + Send {
        let tables = self.tables();
        let result = tables.check_available().map(|()| {
            tables.rooms.get(&room_id).map(|room| RoomOccupancy {
                room: room.clone(),
                bookings: tables
                    .bookings
                    .values()
                    .filter(|booking| booking.room_id == room_id)
                    .cloned()
                    .collect(),
            })
        });
        ready(result)
    }

    fn find_booking_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<BookingWithRoom>>> + Send {
        let tables = self.tables();
        let result = tables.check_available().and_then(|()| {
            let Some(booking) = tables
                .bookings
                .values()
                .find(|booking| booking.user_id == user_id)
            else {
                return Ok(None);
            };
            let room = tables.rooms.get(&booking.room_id).cloned().ok_or_else(|| {
                BookingError::Store(format!("booking {} references missing room", booking.id))
            })?;
            Ok(Some(BookingWithRoom {
                booking: booking.clone(),
                room,
            }))
        });
        ready(result)
    }

    fn update_booking_room(
        &self,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Booking>> + Send {
        let now = self.clock.now();
        let mut tables = self.tables();
        let result = tables.check_available().and_then(|()| {
            let booking = tables.bookings.get_mut(&booking_id).ok_or_else(|| {
                BookingError::Store(format!("booking {booking_id} does not exist"))
            })?;
            booking.room_id = room_id;
            booking.updated_at = now;
            Ok(booking.clone())
        });
        ready(result)
    }
}

impl EligibilityRepository for MockBookingStore {
    fn find_enrollment_with_address(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Enrollment>>> + Send {
        let tables = self.tables();
        let result = tables.check_available().map(|()| {
            tables
                .enrollments
                .values()
                .find(|enrollment| enrollment.user_id == user_id)
                .cloned()
        });
        ready(result)
    }

    fn find_ticket_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> impl Future<Output = Result<Option<Ticket>>> + Send {
        let tables = self.tables();
        let result = tables.check_available().map(|()| {
            tables
                .tickets
                .values()
                .find(|ticket| ticket.enrollment_id == enrollment_id)
                .cloned()
        });
        ready(result)
    }
}

impl SessionRepository for MockBookingStore {
    fn find_user_by_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<UserId>>> + Send {
        let tables = self.tables();
        let result = tables
            .check_available()
            .map(|()| tables.sessions.get(token).copied());
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_room_counts_only_its_bookings() {
        let store = MockBookingStore::new();
        let hotel = store.create_hotel();
        let room_a = store.create_room(hotel, 3);
        let room_b = store.create_room(hotel, 3);
        store.insert_booking(store.create_user(), room_a.id);
        store.insert_booking(store.create_user(), room_a.id);
        store.insert_booking(store.create_user(), room_b.id);

        let occupancy = store
            .find_room_with_bookings(room_a.id)
            .await
            .unwrap_or_default();

        assert_eq!(occupancy.map(|o| o.occupied()), Some(2));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_accessor() {
        let store = MockBookingStore::new();
        let user = store.create_user();
        store.set_unavailable(true);

        assert!(matches!(
            store.find_enrollment_with_address(user).await,
            Err(BookingError::Store(_))
        ));
        assert!(matches!(
            store.create_booking(user, RoomId::new(1)).await,
            Err(BookingError::Store(_))
        ));
        assert_eq!(store.booking_count(), 0);

        store.set_unavailable(false);
        assert!(store.find_enrollment_with_address(user).await.is_ok());
    }

    #[tokio::test]
    async fn test_sessions_resolve_to_their_user() {
        let store = MockBookingStore::new();
        let user = store.create_user();
        let token = store.create_session(user);

        assert_eq!(store.find_user_by_token(&token).await, Ok(Some(user)));
        assert_eq!(store.find_user_by_token("unknown").await, Ok(None));
    }
}
