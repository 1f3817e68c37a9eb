//! HTTP request handlers.

pub mod booking;
pub mod health;

pub use booking::{get_booking, post_booking, update_booking};
pub use health::health_check;
