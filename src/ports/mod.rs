pub mod booking_repository;
pub mod field_directory;
pub mod schedule_repository;
pub mod user_repository;

pub use booking_repository::*;
pub use field_directory::*;
pub use schedule_repository::*;
pub use user_repository::*;

/// ポート実装が返す任意のエラー
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// ポート共通の Result型
pub type Result<T> = std::result::Result<T, BoxError>;
