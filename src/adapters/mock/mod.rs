pub mod booking_repository;
pub mod field_directory;
pub mod schedule_repository;
pub mod user_repository;

pub use booking_repository::BookingRepository;
pub use field_directory::FieldDirectory;
pub use schedule_repository::ScheduleRepository;
pub use user_repository::UserRepository;
