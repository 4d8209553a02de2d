use crate::domain::{
    Booking, BookingId, BookingStatus, NewBooking, Price, ScheduleId, UserId,
};
use crate::ports::Result;
use crate::ports::booking_repository::{
    BookingRepository as BookingRepositoryTrait, SaveBookingError,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

use super::{id_from_db, id_to_db, invalid_data};

const BOOKING_COLUMNS: &str = r#"
    booking_id,
    user_id,
    schedule_id,
    booking_date,
    status,
    total_price,
    created_at,
    updated_at,
    deleted_at
"#;

/// Map a PostgreSQL row into a Booking
///
/// The status text and the price are re-validated on the way back in.
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(invalid_data)?;

    let total_price: i64 = row.get("total_price");
    let total_price = Price::try_new(total_price)
        .map_err(|e| invalid_data(format!("total_price {}: {}", total_price, e)))?;

    Ok(Booking {
        booking_id: BookingId::new(id_from_db("booking_id", row.get("booking_id"))?),
        user_id: UserId::new(id_from_db("user_id", row.get("user_id"))?),
        schedule_id: ScheduleId::new(id_from_db("schedule_id", row.get("schedule_id"))?),
        booking_date: row.get("booking_date"),
        status,
        total_price,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    })
}

/// PostgreSQL implementation of BookingRepository
///
/// Slot uniqueness is backed by the `bookings_active_slot_idx` partial
/// unique index, so concurrent inserts for the same slot cannot both succeed.
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new BookingRepository with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn create(&self, booking: NewBooking) -> std::result::Result<Booking, SaveBookingError> {
        let user_id =
            id_to_db("user_id", booking.user_id.value()).map_err(SaveBookingError::Backend)?;
        let schedule_id = id_to_db("schedule_id", booking.schedule_id.value())
            .map_err(SaveBookingError::Backend)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO bookings (user_id, schedule_id, booking_date, status, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .bind(schedule_id)
        .bind(booking.booking_date)
        .bind(booking.status.as_str())
        .bind(booking.total_price.amount())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                SaveBookingError::SlotTaken
            }
            other => SaveBookingError::Backend(Box::new(other)),
        })?;

        map_row_to_booking(&row).map_err(SaveBookingError::Backend)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM bookings
            WHERE booking_id = $1 AND deleted_at IS NULL
            "#,
            BOOKING_COLUMNS
        ))
        .bind(id_to_db("booking_id", booking_id.value())?)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// Uses the (user_id, booking_date DESC) partial index.
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM bookings
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY booking_date DESC, booking_id DESC
            "#,
            BOOKING_COLUMNS
        ))
        .bind(id_to_db("user_id", user_id.value())?)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_active_for_slot(
        &self,
        schedule_id: ScheduleId,
        booking_date: NaiveDate,
    ) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM bookings
            WHERE schedule_id = $1
              AND booking_date = $2
              AND status IN ('PENDING', 'CONFIRMED')
              AND deleted_at IS NULL
            "#,
            BOOKING_COLUMNS
        ))
        .bind(id_to_db("schedule_id", schedule_id.value())?)
        .bind(booking_date)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    async fn count_active_from(
        &self,
        schedule_id: ScheduleId,
        from_date: NaiveDate,
    ) -> Result<u64> {
        let count: i64 = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM bookings
            WHERE schedule_id = $1
              AND booking_date >= $2
              AND status IN ('PENDING', 'CONFIRMED')
              AND deleted_at IS NULL
            "#,
        )
        .bind(id_to_db("schedule_id", schedule_id.value())?)
        .bind(from_date)
        .fetch_one(&self.pool)
        .await?
        .get("count");

        id_from_db("count", count)
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = $3
            WHERE booking_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id_to_db("booking_id", booking_id.value())?)
        .bind(status.as_str())
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
