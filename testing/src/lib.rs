//! # Hotel Booking Testing
//!
//! Testing utilities for the hotel booking service.
//!
//! This crate provides:
//! - [`MockBookingStore`]: an in-memory implementation of every provider trait,
//!   with fixture builders for users, enrollments, tickets, hotels and rooms
//! - [`FixedClock`]: deterministic time
//! - proptest strategies for ticket profiles
//!
//! ## Example
//!
//! ```
//! use hotel_booking_core::BookingService;
//! use hotel_booking_testing::MockBookingStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MockBookingStore::new());
//! let user = store.eligible_user();
//! let hotel = store.create_hotel();
//! let room = store.create_room(hotel, 3);
//!
//! let service = BookingService::new(Arc::clone(&store), Arc::clone(&store));
//! # let _ = (service, user, room);
//! ```

pub mod store;

pub use mocks::{FixedClock, test_clock};
pub use store::MockBookingStore;

/// Mock implementations of environment traits.
pub mod mocks {
    use chrono::{DateTime, Utc};
    use hotel_booking_core::environment::Clock;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use hotel_booking_testing::mocks::FixedClock;
    /// use hotel_booking_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Property-based testing utilities.
pub mod properties {
    use hotel_booking_core::TicketStatus;
    use proptest::prelude::*;

    /// The three facts of a ticket that decide hotel eligibility.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TicketProfile {
        /// Payment status
        pub status: TicketStatus,
        /// Remote-only ticket
        pub is_remote: bool,
        /// Hotel included
        pub includes_hotel: bool,
    }

    impl TicketProfile {
        /// Whether a ticket with this profile allows booking a room.
        #[must_use]
        pub fn is_eligible(&self) -> bool {
            self.status == TicketStatus::Paid && !self.is_remote && self.includes_hotel
        }
    }

    /// Strategy over both ticket statuses.
    pub fn ticket_status() -> impl Strategy<Value = TicketStatus> {
        prop_oneof![Just(TicketStatus::Reserved), Just(TicketStatus::Paid)]
    }

    /// Strategy over every combination of status and ticket-type flags.
    pub fn ticket_profile() -> impl Strategy<Value = TicketProfile> {
        (ticket_status(), any::<bool>(), any::<bool>()).prop_map(
            |(status, is_remote, includes_hotel)| TicketProfile {
                status,
                is_remote,
                includes_hotel,
            },
        )
    }
}

/// Install a test-friendly `tracing` subscriber.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("hotel_booking=debug")
        .try_init();
}
