mod errors;
mod schedule_service;

pub use errors::{Result, ScheduleError};
pub use schedule_service::{
    create_schedule, delete_schedule, get_schedule, get_schedules_by_field, update_schedule,
};
