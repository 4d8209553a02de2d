use crate::domain::{DayOfWeek, FieldId, NewSchedule, Price, Schedule, ScheduleId, VenueId};
use crate::ports::Result;
use crate::ports::schedule_repository::ScheduleRepository as ScheduleRepositoryTrait;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

use super::{id_from_db, id_to_db, invalid_data};

const SCHEDULE_COLUMNS: &str = r#"
    schedule_id,
    field_id,
    venue_id,
    day_of_week,
    start_time,
    end_time,
    price,
    created_at,
    updated_at,
    deleted_at
"#;

/// Map a PostgreSQL row into a Schedule
fn map_row_to_schedule(row: &PgRow) -> Result<Schedule> {
    let day: i16 = row.get("day_of_week");
    let day_of_week = DayOfWeek::try_from(i32::from(day))
        .map_err(|e| invalid_data(format!("day_of_week {}: {}", day, e)))?;

    let price: i64 = row.get("price");
    let price =
        Price::try_new(price).map_err(|e| invalid_data(format!("price {}: {}", price, e)))?;

    Ok(Schedule {
        schedule_id: ScheduleId::new(id_from_db("schedule_id", row.get("schedule_id"))?),
        field_id: FieldId::new(id_from_db("field_id", row.get("field_id"))?),
        venue_id: VenueId::new(id_from_db("venue_id", row.get("venue_id"))?),
        day_of_week,
        start_time: row.get("start_time"),
        end_time: row.get("end_time"),
        price,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    })
}

/// PostgreSQL implementation of ScheduleRepository
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepositoryTrait for ScheduleRepository {
    async fn find_by_id(&self, schedule_id: ScheduleId) -> Result<Option<Schedule>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM schedules
            WHERE schedule_id = $1 AND deleted_at IS NULL
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(id_to_db("schedule_id", schedule_id.value())?)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_schedule).transpose()
    }

    async fn find_by_field_id(&self, field_id: FieldId) -> Result<Vec<Schedule>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM schedules
            WHERE field_id = $1 AND deleted_at IS NULL
            ORDER BY day_of_week, start_time, schedule_id
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(id_to_db("field_id", field_id.value())?)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_schedule).collect()
    }

    async fn create(&self, schedule: NewSchedule) -> Result<Schedule> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO schedules (field_id, venue_id, day_of_week, start_time, end_time, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(id_to_db("field_id", schedule.field_id.value())?)
        .bind(id_to_db("venue_id", schedule.venue_id.value())?)
        .bind(i16::from(schedule.day_of_week.value()))
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .bind(schedule.price.amount())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_schedule(&row)
    }

    async fn update(&self, schedule: &Schedule) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE schedules
            SET day_of_week = $2,
                start_time = $3,
                end_time = $4,
                price = $5,
                updated_at = $6
            WHERE schedule_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id_to_db("schedule_id", schedule.schedule_id.value())?)
        .bind(i16::from(schedule.day_of_week.value()))
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .bind(schedule.price.amount())
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, schedule_id: ScheduleId, deleted_at: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE schedules
            SET deleted_at = $2, updated_at = $2
            WHERE schedule_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id_to_db("schedule_id", schedule_id.value())?)
        .bind(deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
