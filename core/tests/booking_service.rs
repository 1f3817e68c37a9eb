//! Booking rules exercised against the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use hotel_booking_core::{
    BookingError, BookingId, BookingService, ForbiddenReason, RoomId, TicketStatus, UserId,
};
use hotel_booking_testing::MockBookingStore;
use hotel_booking_testing::properties::ticket_profile;
use proptest::prelude::*;
use std::sync::Arc;

type Service = BookingService<MockBookingStore, MockBookingStore>;

fn setup() -> (Arc<MockBookingStore>, Service) {
    hotel_booking_testing::init_test_tracing();
    let store = Arc::new(MockBookingStore::new());
    let service = BookingService::new(Arc::clone(&store), Arc::clone(&store));
    (store, service)
}

fn assert_forbidden<T: std::fmt::Debug>(result: hotel_booking_core::Result<T>, reason: ForbiddenReason) {
    match result {
        Err(BookingError::Forbidden { reason: actual }) => assert_eq!(actual, reason),
        other => panic!("expected Forbidden({reason}), got {other:?}"),
    }
}

/// An enrolled user with a ticket of the given shape.
fn user_with_ticket(
    store: &MockBookingStore,
    status: TicketStatus,
    is_remote: bool,
    includes_hotel: bool,
) -> UserId {
    let user = store.create_user();
    let enrollment = store.create_enrollment_with_address(user);
    let ticket_type = store.create_ticket_type(is_remote, includes_hotel);
    store.create_ticket(enrollment.id, &ticket_type, status);
    user
}

// ============================================================================
// Eligibility
// ============================================================================

#[tokio::test]
async fn test_user_without_enrollment_is_forbidden() {
    let (store, service) = setup();
    let user = store.create_user();
    let room = store.create_room(store.create_hotel(), 3);

    assert_forbidden(
        service.post_booking(user, room.id).await,
        ForbiddenReason::NotEnrolled,
    );
    assert_forbidden(service.get_booking(user).await, ForbiddenReason::NotEnrolled);
    assert_eq!(store.booking_count(), 0);
}

#[tokio::test]
async fn test_ineligible_user_cannot_update_booking() {
    let (store, service) = setup();
    let user = user_with_ticket(&store, TicketStatus::Paid, false, false);
    let hotel = store.create_hotel();
    let from = store.create_room(hotel, 3);
    let to = store.create_room(hotel, 3);
    let booking = store.insert_booking(user, from.id);

    assert_forbidden(
        service.update_booking(to.id, user, booking.id).await,
        ForbiddenReason::HotelNotIncluded,
    );
    assert_eq!(store.bookings_of(user)[0].room_id, from.id);
    assert!(store.bookings_in(to.id).is_empty());
}

#[tokio::test]
async fn test_eligibility_is_stable_on_unchanged_data() {
    let (store, service) = setup();
    let eligible = store.eligible_user();
    let remote = user_with_ticket(&store, TicketStatus::Paid, true, false);

    let first = service.check_eligibility(eligible).await.unwrap();
    let second = service.check_eligibility(eligible).await.unwrap();
    assert_eq!(first, second);

    assert_forbidden(
        service.check_eligibility(remote).await,
        ForbiddenReason::RemoteTicket,
    );
    assert_forbidden(
        service.check_eligibility(remote).await,
        ForbiddenReason::RemoteTicket,
    );
}

#[tokio::test]
async fn test_enrollment_without_ticket_is_forbidden() {
    let (store, service) = setup();
    let user = store.create_user();
    store.create_enrollment_with_address(user);
    let room = store.create_room(store.create_hotel(), 3);

    assert_forbidden(
        service.post_booking(user, room.id).await,
        ForbiddenReason::NoTicket,
    );
}

#[tokio::test]
async fn test_reserved_ticket_is_forbidden() {
    let (store, service) = setup();
    let user = user_with_ticket(&store, TicketStatus::Reserved, false, true);
    let room = store.create_room(store.create_hotel(), 3);

    assert_forbidden(
        service.post_booking(user, room.id).await,
        ForbiddenReason::TicketNotPaid,
    );
}

#[tokio::test]
async fn test_remote_ticket_is_forbidden() {
    let (store, service) = setup();
    let user = user_with_ticket(&store, TicketStatus::Paid, true, false);
    let room = store.create_room(store.create_hotel(), 3);

    assert_forbidden(
        service.post_booking(user, room.id).await,
        ForbiddenReason::RemoteTicket,
    );
}

#[tokio::test]
async fn test_ticket_without_hotel_is_forbidden() {
    let (store, service) = setup();
    let user = user_with_ticket(&store, TicketStatus::Paid, false, false);
    let room = store.create_room(store.create_hotel(), 3);

    assert_forbidden(
        service.post_booking(user, room.id).await,
        ForbiddenReason::HotelNotIncluded,
    );
}

#[tokio::test]
async fn test_eligibility_is_checked_before_room_existence() {
    let (store, service) = setup();
    let user = store.create_user();

    assert_forbidden(
        service.post_booking(user, RoomId::new(9_999)).await,
        ForbiddenReason::NotEnrolled,
    );
}

#[tokio::test]
async fn test_eligibility_is_reevaluated_on_every_call() {
    let (store, service) = setup();
    let user = store.create_user();
    let enrollment = store.create_enrollment_with_address(user);
    let ticket_type = store.create_ticket_type_with_hotel();
    let ticket = store.create_ticket(enrollment.id, &ticket_type, TicketStatus::Paid);
    let room = store.create_room(store.create_hotel(), 3);

    service.post_booking(user, room.id).await.unwrap();
    assert!(service.get_booking(user).await.is_ok());

    store.set_ticket_status(ticket.id, TicketStatus::Reserved);

    assert_forbidden(service.get_booking(user).await, ForbiddenReason::TicketNotPaid);
}

// ============================================================================
// post_booking
// ============================================================================

#[tokio::test]
async fn test_post_booking_creates_booking() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_room(store.create_hotel(), 3);

    let booking = service.post_booking(user, room.id).await.unwrap();

    assert_eq!(booking.user_id, user);
    assert_eq!(booking.room_id, room.id);
    assert_eq!(store.bookings_of(user), vec![booking]);
}

#[tokio::test]
async fn test_post_booking_unknown_room_is_not_found() {
    let (store, service) = setup();
    let user = store.eligible_user();

    let result = service.post_booking(user, RoomId::new(9_999)).await;

    assert_eq!(result, Err(BookingError::room_not_found()));
    assert_eq!(store.booking_count(), 0);
}

#[tokio::test]
async fn test_post_booking_full_room_is_forbidden() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_unitary_room(store.create_hotel());
    store.insert_booking(store.create_user(), room.id);

    assert_forbidden(
        service.post_booking(user, room.id).await,
        ForbiddenReason::RoomFull,
    );
    assert_eq!(store.bookings_in(room.id).len(), 1);
}

#[tokio::test]
async fn test_post_booking_takes_last_slot() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_room(store.create_hotel(), 3);
    store.insert_booking(store.create_user(), room.id);
    store.insert_booking(store.create_user(), room.id);

    service.post_booking(user, room.id).await.unwrap();

    assert_eq!(store.bookings_in(room.id).len(), 3);
}

#[tokio::test]
async fn test_post_booking_zero_capacity_room_is_full() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_room(store.create_hotel(), 0);

    assert_forbidden(
        service.post_booking(user, room.id).await,
        ForbiddenReason::RoomFull,
    );
}

#[tokio::test]
async fn test_second_booking_is_forbidden() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let hotel = store.create_hotel();
    let first = store.create_room(hotel, 3);
    let second = store.create_room(hotel, 3);

    service.post_booking(user, first.id).await.unwrap();

    assert_forbidden(
        service.post_booking(user, second.id).await,
        ForbiddenReason::AlreadyBooked,
    );
    assert_forbidden(
        service.post_booking(user, first.id).await,
        ForbiddenReason::AlreadyBooked,
    );
    assert_eq!(store.bookings_of(user).len(), 1);
}

#[tokio::test]
async fn test_full_room_wins_over_existing_booking() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let hotel = store.create_hotel();
    let own = store.create_room(hotel, 3);
    let full = store.create_unitary_room(hotel);
    store.insert_booking(user, own.id);
    store.insert_booking(store.create_user(), full.id);

    assert_forbidden(
        service.post_booking(user, full.id).await,
        ForbiddenReason::RoomFull,
    );
}

// ============================================================================
// get_booking
// ============================================================================

#[tokio::test]
async fn test_get_booking_returns_id_and_room() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_room(store.create_hotel(), 2);
    let booking = store.insert_booking(user, room.id);

    let details = service.get_booking(user).await.unwrap();

    assert_eq!(details.id, booking.id);
    assert_eq!(details.room, room);
}

#[tokio::test]
async fn test_get_booking_without_booking_is_not_found() {
    let (store, service) = setup();
    let user = store.eligible_user();

    assert_eq!(
        service.get_booking(user).await,
        Err(BookingError::booking_not_found())
    );
}

#[tokio::test]
async fn test_get_booking_ignores_other_users_bookings() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_room(store.create_hotel(), 3);
    store.insert_booking(store.create_user(), room.id);

    assert!(service.get_booking(user).await.unwrap_err().is_not_found());
}

// ============================================================================
// update_booking
// ============================================================================

#[tokio::test]
async fn test_update_booking_moves_room() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let hotel = store.create_hotel();
    let from = store.create_room(hotel, 2);
    let to = store.create_room(hotel, 2);
    let booking = store.insert_booking(user, from.id);

    let updated = service.update_booking(to.id, user, booking.id).await.unwrap();

    assert_eq!(updated.id, booking.id);
    assert_eq!(updated.room_id, to.id);
    assert_eq!(updated.user_id, user);
    assert!(store.bookings_in(from.id).is_empty());
    assert_eq!(store.bookings_in(to.id).len(), 1);
}

#[tokio::test]
async fn test_update_booking_takes_last_slot() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let hotel = store.create_hotel();
    let from = store.create_room(hotel, 2);
    let to = store.create_room(hotel, 3);
    let booking = store.insert_booking(user, from.id);
    store.insert_booking(store.create_user(), to.id);
    store.insert_booking(store.create_user(), to.id);

    let updated = service.update_booking(to.id, user, booking.id).await.unwrap();

    assert_eq!(updated.room_id, to.id);
    assert_eq!(store.bookings_in(to.id).len(), 3);
    assert!(store.bookings_in(from.id).is_empty());
}

#[tokio::test]
async fn test_update_booking_without_booking_is_forbidden() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_room(store.create_hotel(), 2);

    assert_forbidden(
        service.update_booking(room.id, user, BookingId::new(1)).await,
        ForbiddenReason::NoBooking,
    );
}

#[tokio::test]
async fn test_update_booking_of_another_user_is_forbidden() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let hotel = store.create_hotel();
    let own_room = store.create_room(hotel, 2);
    let target = store.create_room(hotel, 2);
    store.insert_booking(user, own_room.id);
    let foreign = store.insert_booking(store.create_user(), own_room.id);

    assert_forbidden(
        service.update_booking(target.id, user, foreign.id).await,
        ForbiddenReason::NotBookingOwner,
    );
    assert_eq!(store.bookings_in(own_room.id).len(), 2);
    assert!(store.bookings_in(target.id).is_empty());
}

#[tokio::test]
async fn test_update_booking_to_full_room_is_forbidden() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let hotel = store.create_hotel();
    let from = store.create_room(hotel, 2);
    let full = store.create_unitary_room(hotel);
    let booking = store.insert_booking(user, from.id);
    store.insert_booking(store.create_user(), full.id);

    assert_forbidden(
        service.update_booking(full.id, user, booking.id).await,
        ForbiddenReason::RoomFull,
    );
    assert_eq!(store.bookings_of(user)[0].room_id, from.id);
}

#[tokio::test]
async fn test_update_booking_to_own_full_room_is_forbidden() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_unitary_room(store.create_hotel());
    let booking = store.insert_booking(user, room.id);

    assert_forbidden(
        service.update_booking(room.id, user, booking.id).await,
        ForbiddenReason::RoomFull,
    );
}

#[tokio::test]
async fn test_update_booking_unknown_room_is_not_found() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_room(store.create_hotel(), 2);
    let booking = store.insert_booking(user, room.id);

    assert_eq!(
        service
            .update_booking(RoomId::new(9_999), user, booking.id)
            .await,
        Err(BookingError::room_not_found())
    );
}

// ============================================================================
// Store faults
// ============================================================================

#[tokio::test]
async fn test_store_fault_propagates_without_writes() {
    let (store, service) = setup();
    let user = store.eligible_user();
    let room = store.create_room(store.create_hotel(), 2);
    store.set_unavailable(true);

    assert!(matches!(
        service.post_booking(user, room.id).await,
        Err(BookingError::Store(_))
    ));
    assert!(matches!(
        service.get_booking(user).await,
        Err(BookingError::Store(_))
    ));

    store.set_unavailable(false);
    assert_eq!(store.booking_count(), 0);
}

// ============================================================================
// Properties
// ============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_only_paid_in_person_hotel_tickets_may_book(profile in ticket_profile()) {
        let (store, service) = setup();
        let user = user_with_ticket(&store, profile.status, profile.is_remote, profile.includes_hotel);
        let room = store.create_room(store.create_hotel(), 1);

        let result = runtime().block_on(service.post_booking(user, room.id));

        prop_assert_eq!(result.is_ok(), profile.is_eligible());
        prop_assert_eq!(store.booking_count(), usize::from(profile.is_eligible()));
        if let Err(error) = result {
            prop_assert!(error.is_forbidden());
        }
    }

    #[test]
    fn prop_room_never_exceeds_capacity(capacity in 0i32..6, applicants in 0usize..10) {
        let (store, service) = setup();
        let room = store.create_room(store.create_hotel(), capacity);
        let rt = runtime();

        let mut accepted = 0usize;
        for _ in 0..applicants {
            let user = store.eligible_user();
            match rt.block_on(service.post_booking(user, room.id)) {
                Ok(_) => accepted += 1,
                Err(error) => prop_assert_eq!(error.forbidden_reason(), Some(ForbiddenReason::RoomFull)),
            }
        }

        let capacity = usize::try_from(capacity).unwrap();
        prop_assert_eq!(accepted, applicants.min(capacity));
        prop_assert!(store.bookings_in(room.id).len() <= capacity);
    }
}
