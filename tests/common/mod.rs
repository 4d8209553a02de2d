#![allow(dead_code)]

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use futsal_booking::adapters::mock;
use futsal_booking::application::ServiceDependencies;
use futsal_booking::config::BookingConfig;
use futsal_booking::domain::{FieldId, NewSchedule, Schedule, UserId, VenueId};
use futsal_booking::ports::{Role, ScheduleRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const FIELD_ID: u64 = 1;
pub const VENUE_ID: u64 = 1;
pub const ADMIN_ID: u64 = 1;
pub const CUSTOMER_ID: u64 = 5;
pub const OTHER_CUSTOMER_ID: u64 = 6;

/// テスト出力にログを流す（RUST_LOG で絞り込み可能）
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// テスト用データベースプールを作成し、マイグレーションを実行
///
/// 本番と同じ`connect`を使うことで、テストと本番の一貫性を保証します。
pub async fn create_test_pool() -> PgPool {
    let config = BookingConfig::from_env().expect("Invalid test configuration");

    futsal_booking::adapters::postgres::connect(&config)
        .await
        .expect("Failed to connect to test database")
}

/// UTCの日時を作る
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// 2025-06-02（月曜日）09:00 UTC
pub fn monday_morning() -> DateTime<Utc> {
    at(2025, 6, 2, 9)
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// インメモリ実装で組み立てたテスト環境
///
/// コート1面（施設1）、管理者1人、顧客2人を登録済み。
pub struct TestEnv {
    pub bookings: Arc<mock::BookingRepository>,
    pub schedules: Arc<mock::ScheduleRepository>,
    pub users: Arc<mock::UserRepository>,
    pub fields: Arc<mock::FieldDirectory>,
    pub deps: ServiceDependencies,
}

impl TestEnv {
    pub fn new() -> Self {
        init_tracing();

        let bookings = Arc::new(mock::BookingRepository::new());
        let schedules = Arc::new(mock::ScheduleRepository::new());
        let users = Arc::new(mock::UserRepository::new());
        let fields = Arc::new(mock::FieldDirectory::new());

        fields.add_field(FieldId::new(FIELD_ID), VenueId::new(VENUE_ID));
        users.add_user(UserId::new(ADMIN_ID), Role::Admin);
        users.add_user(UserId::new(CUSTOMER_ID), Role::Customer);
        users.add_user(UserId::new(OTHER_CUSTOMER_ID), Role::Customer);

        let deps = ServiceDependencies {
            booking_repository: bookings.clone(),
            schedule_repository: schedules.clone(),
            user_repository: users.clone(),
            field_directory: fields.clone(),
        };

        Self {
            bookings,
            schedules,
            users,
            fields,
            deps,
        }
    }

    /// 水曜 10:00-12:00、料金 100,000 の枠を登録する
    pub async fn wednesday_schedule(&self) -> Schedule {
        self.add_schedule(3, time(10, 0), time(12, 0), 100_000).await
    }

    pub async fn add_schedule(
        &self,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
        price: i64,
    ) -> Schedule {
        let new_schedule = NewSchedule::try_new(
            FieldId::new(FIELD_ID),
            VenueId::new(VENUE_ID),
            day_of_week,
            start_time,
            end_time,
            price,
        )
        .expect("Invalid test schedule");

        self.schedules
            .create(new_schedule)
            .await
            .expect("Failed to create test schedule")
    }
}
