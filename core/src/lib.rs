//! # Hotel Booking Core
//!
//! Eligibility and capacity rules for conference hotel bookings.
//!
//! A user may hold exactly one booking. To create, read, or change it they
//! must be enrolled and hold a paid, in-person ticket that includes a hotel
//! stay. A room never accepts more bookings than its capacity, as observed at
//! check time.
//!
//! ## Core Concepts
//!
//! - **Types**: identifiers and records ([`types`])
//! - **Providers**: persistence traits injected into the service ([`providers`])
//! - **Service**: the rules themselves ([`BookingService`])
//! - **Errors**: `NotFound`, `Forbidden`, or a store fault ([`BookingError`])
//!
//! ## Example
//!
//! ```ignore
//! use hotel_booking_core::{BookingService, RoomId, UserId};
//! use std::sync::Arc;
//!
//! let store = Arc::new(PostgresBookingStore::new(pool));
//! let service = BookingService::new(Arc::clone(&store), store);
//!
//! let booking = service.post_booking(UserId::new(1), RoomId::new(12)).await?;
//! println!("booked {}", booking.id);
//! ```

pub mod environment;
pub mod error;
pub mod providers;
pub mod service;
pub mod types;

pub use error::{BookingError, ForbiddenReason, Result};
pub use providers::{BookingRepository, EligibilityRepository, SessionRepository};
pub use service::BookingService;
pub use types::*;
