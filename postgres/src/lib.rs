//! `PostgreSQL` storage for the hotel booking service.
//!
//! [`PostgresBookingStore`] implements every provider trait from
//! `hotel-booking-core` over a single connection pool:
//!
//! - [`BookingRepository`]: bookings and rooms
//! - [`EligibilityRepository`]: enrollments, addresses, tickets and ticket types
//! - [`SessionRepository`]: bearer token lookup
//!
//! Queries are checked at runtime (`query_as` + `FromRow`), so building the
//! crate does not need a live database.
//!
//! # Example
//!
//! ```no_run
//! use hotel_booking_postgres::PostgresBookingStore;
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgres://localhost/hotel").await?;
//! let store = PostgresBookingStore::new(pool);
//! store.migrate().await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`BookingRepository`]: hotel_booking_core::BookingRepository
//! [`EligibilityRepository`]: hotel_booking_core::EligibilityRepository
//! [`SessionRepository`]: hotel_booking_core::SessionRepository

mod bookings;
mod eligibility;
mod rows;
mod sessions;

use hotel_booking_core::{BookingError, Result};
use sqlx::PgPool;

/// PostgreSQL-backed store for bookings and the facts they depend on.
#[derive(Clone, Debug)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    /// Creates a new `PostgresBookingStore`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns error if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| BookingError::Store(format!("Migration failed: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

/// Build the error mapper for a failed query.
///
/// Logs the fault and counts it under `hotel_booking_store_errors_total`.
fn store_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> BookingError {
    move |e| {
        tracing::error!(operation, error = %e, "Store query failed");
        metrics::counter!("hotel_booking_store_errors_total", "operation" => operation)
            .increment(1);
        BookingError::Store(format!("Failed to {operation}: {e}"))
    }
}
