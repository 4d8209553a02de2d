pub mod booking_repository;
pub mod field_directory;
pub mod schedule_repository;
pub mod user_repository;

// パブリックに型を再エクスポート
pub use booking_repository::BookingRepository as PostgresBookingRepository;
pub use field_directory::FieldDirectory as PostgresFieldDirectory;
pub use schedule_repository::ScheduleRepository as PostgresScheduleRepository;
pub use user_repository::UserRepository as PostgresUserRepository;

use crate::config::BookingConfig;
use crate::ports::BoxError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a connection pool from configuration and apply migrations
pub async fn connect(config: &BookingConfig) -> Result<PgPool, BoxError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.request_timeout)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(
        max_connections = config.max_connections,
        "database pool ready"
    );

    Ok(pool)
}

/// Error for a row that cannot be mapped back into the domain
fn invalid_data(message: String) -> BoxError {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// Convert a BIGSERIAL column into an unsigned id
fn id_from_db(column: &str, value: i64) -> Result<u64, BoxError> {
    u64::try_from(value).map_err(|_| invalid_data(format!("{} out of range: {}", column, value)))
}

/// Convert an unsigned id into a BIGINT bind parameter
///
/// Ids above `i64::MAX` cannot exist in a BIGSERIAL column and are rejected
/// instead of wrapping to a negative key.
fn id_to_db(column: &str, value: u64) -> Result<i64, BoxError> {
    i64::try_from(value).map_err(|_| invalid_data(format!("{} out of range: {}", column, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_to_db_rejects_ids_beyond_bigint() {
        assert_eq!(id_to_db("booking_id", 42).unwrap(), 42);
        assert_eq!(id_to_db("booking_id", i64::MAX as u64).unwrap(), i64::MAX);

        let err = id_to_db("booking_id", u64::MAX).unwrap_err();
        assert!(err.to_string().contains("booking_id out of range"));
    }

    #[test]
    fn test_id_from_db_rejects_negative_values() {
        assert_eq!(id_from_db("user_id", 7).unwrap(), 7);
        assert!(id_from_db("user_id", -1).is_err());
    }
}
