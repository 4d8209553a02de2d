mod booking_service;
mod errors;

pub use booking_service::{cancel_booking, create_booking, get_booking_by_id, get_my_bookings};
pub use errors::{BookingError, Result};
