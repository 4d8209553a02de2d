pub mod booking;
pub mod booking_validator;
pub mod commands;
pub mod errors;
pub mod schedule;
pub mod value_objects;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use errors::*;
pub use schedule::{NewSchedule, Schedule, ScheduleUpdate};
pub use value_objects::*;
