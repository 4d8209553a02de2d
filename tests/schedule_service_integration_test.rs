mod common;

use common::*;
use futsal_booking::application::OperationContext;
use futsal_booking::application::booking::{BookingError, cancel_booking, create_booking};
use futsal_booking::application::schedule::{
    ScheduleError, create_schedule, delete_schedule, get_schedule, get_schedules_by_field,
    update_schedule,
};
use futsal_booking::domain::commands::*;
use futsal_booking::domain::*;

fn create_cmd(day_of_week: i32, start_time: &str, end_time: &str, price: i64) -> CreateSchedule {
    CreateSchedule {
        field_id: FieldId::new(FIELD_ID),
        day_of_week,
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        price,
    }
}

fn time_change(
    schedule_id: ScheduleId,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> UpdateSchedule {
    UpdateSchedule {
        schedule_id,
        day_of_week: None,
        start_time: Some("14:00".to_string()),
        end_time: Some("16:00".to_string()),
        price: None,
        updated_at,
    }
}

async fn book(env: &TestEnv, schedule_id: ScheduleId, date: &str) -> Booking {
    create_booking(
        &env.deps,
        &OperationContext::default(),
        CreateBooking {
            schedule_id,
            booking_date: date.to_string(),
            user_id: UserId::new(CUSTOMER_ID),
            requested_at: monday_morning(),
        },
    )
    .await
    .unwrap()
}

// ============================================================================
// スケジュール登録
// ============================================================================

#[tokio::test]
async fn test_create_schedule_success() {
    // Arrange
    let env = TestEnv::new();
    let ctx = OperationContext::default();

    // Act
    let schedule = create_schedule(&env.deps, &ctx, create_cmd(3, "10:00", "12:00", 100_000))
        .await
        .unwrap();

    // Assert
    assert!(!schedule.schedule_id.is_unset());
    assert_eq!(schedule.field_id, FieldId::new(FIELD_ID));
    assert_eq!(schedule.venue_id, VenueId::new(VENUE_ID));
    assert_eq!(schedule.day_of_week, DayOfWeek::WEDNESDAY);
    assert_eq!(schedule.start_time, time(10, 0));
    assert_eq!(schedule.end_time, time(12, 0));
    assert_eq!(schedule.price.amount(), 100_000);

    let stored = get_schedule(&env.deps, &ctx, schedule.schedule_id)
        .await
        .unwrap();
    assert_eq!(stored, schedule);
}

#[tokio::test]
async fn test_create_schedule_validation_errors() {
    let env = TestEnv::new();
    let ctx = OperationContext::default();

    let result = create_schedule(&env.deps, &ctx, create_cmd(0, "10:00", "12:00", 100_000)).await;
    assert!(matches!(result, Err(ScheduleError::InvalidDayOfWeek)));

    let result = create_schedule(&env.deps, &ctx, create_cmd(8, "10:00", "12:00", 100_000)).await;
    assert!(matches!(result, Err(ScheduleError::InvalidDayOfWeek)));

    let result = create_schedule(&env.deps, &ctx, create_cmd(3, "12:00", "12:00", 100_000)).await;
    assert!(matches!(result, Err(ScheduleError::InvalidTimeRange)));

    let result = create_schedule(&env.deps, &ctx, create_cmd(3, "12:00", "10:00", 100_000)).await;
    assert!(matches!(result, Err(ScheduleError::InvalidTimeRange)));

    let result = create_schedule(&env.deps, &ctx, create_cmd(3, "10:00", "12:00", 0)).await;
    assert!(matches!(result, Err(ScheduleError::InvalidPrice)));

    for start in ["10am", "9:00", " 10:00"] {
        let result = create_schedule(&env.deps, &ctx, create_cmd(3, start, "12:00", 100_000)).await;
        assert!(matches!(result, Err(ScheduleError::InvalidTimeFormat)));
    }
}

#[tokio::test]
async fn test_create_schedule_requires_field() {
    let env = TestEnv::new();
    let ctx = OperationContext::default();

    let cmd = CreateSchedule {
        field_id: FieldId::new(0),
        ..create_cmd(3, "10:00", "12:00", 100_000)
    };

    let result = create_schedule(&env.deps, &ctx, cmd).await;
    assert!(matches!(result, Err(ScheduleError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_create_schedule_field_not_found() {
    let env = TestEnv::new();
    let ctx = OperationContext::default();

    let cmd = CreateSchedule {
        field_id: FieldId::new(99),
        ..create_cmd(3, "10:00", "12:00", 100_000)
    };

    let result = create_schedule(&env.deps, &ctx, cmd).await;
    assert!(matches!(result, Err(ScheduleError::FieldNotFound)));
}

#[tokio::test]
async fn test_create_schedule_with_expired_context() {
    let env = TestEnv::new();
    let ctx = OperationContext::with_deadline(tokio::time::Instant::now());

    let result = create_schedule(&env.deps, &ctx, create_cmd(3, "10:00", "12:00", 100_000)).await;
    assert!(matches!(result, Err(ScheduleError::Timeout)));
}

// ============================================================================
// スケジュールの取得
// ============================================================================

#[tokio::test]
async fn test_get_schedule_not_found() {
    let env = TestEnv::new();
    let ctx = OperationContext::default();

    let result = get_schedule(&env.deps, &ctx, ScheduleId::new(42)).await;
    assert!(matches!(result, Err(ScheduleError::ScheduleNotFound)));
}

#[tokio::test]
async fn test_get_schedules_by_field_ordered_by_day_and_time() {
    // Arrange
    let env = TestEnv::new();
    let ctx = OperationContext::default();

    for (day, start, end) in [
        (5, "19:00", "21:00"),
        (3, "18:00", "20:00"),
        (3, "08:00", "10:00"),
    ] {
        create_schedule(&env.deps, &ctx, create_cmd(day, start, end, 100_000))
            .await
            .unwrap();
    }

    // Act
    let schedules = get_schedules_by_field(&env.deps, &ctx, FieldId::new(FIELD_ID))
        .await
        .unwrap();

    // Assert
    let slots: Vec<(u8, String)> = schedules
        .iter()
        .map(|s| (s.day_of_week.value(), s.start_time.format("%H:%M").to_string()))
        .collect();
    assert_eq!(
        slots,
        vec![
            (3, "08:00".to_string()),
            (3, "18:00".to_string()),
            (5, "19:00".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_get_schedules_by_field_empty_and_unknown() {
    let env = TestEnv::new();
    let ctx = OperationContext::default();

    let schedules = get_schedules_by_field(&env.deps, &ctx, FieldId::new(FIELD_ID))
        .await
        .unwrap();
    assert!(schedules.is_empty());

    let result = get_schedules_by_field(&env.deps, &ctx, FieldId::new(99)).await;
    assert!(matches!(result, Err(ScheduleError::FieldNotFound)));
}

// ============================================================================
// スケジュールの更新
// ============================================================================

#[tokio::test]
async fn test_update_schedule_time_without_bookings() {
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    let ctx = OperationContext::default();
    let updated_at = at(2025, 6, 3, 9);

    let updated = update_schedule(&env.deps, &ctx, time_change(schedule.schedule_id, updated_at))
        .await
        .unwrap();

    assert_eq!(updated.start_time, time(14, 0));
    assert_eq!(updated.end_time, time(16, 0));
    assert_eq!(updated.price, schedule.price);
    assert_eq!(updated.updated_at, updated_at);

    let stored = get_schedule(&env.deps, &ctx, schedule.schedule_id)
        .await
        .unwrap();
    assert_eq!(stored.start_time, time(14, 0));
    assert_eq!(stored.created_at, schedule.created_at);
}

#[tokio::test]
async fn test_update_schedule_blocked_by_upcoming_booking() {
    // Arrange: 2025-06-11 の予約がある
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    book(&env, schedule.schedule_id, "2025-06-11").await;
    let ctx = OperationContext::default();

    // Act: 2025-06-03 に時間帯を変更
    let result = update_schedule(
        &env.deps,
        &ctx,
        time_change(schedule.schedule_id, at(2025, 6, 3, 9)),
    )
    .await;

    // Assert
    assert!(matches!(result, Err(ScheduleError::ScheduleHasBookings)));
    let stored = get_schedule(&env.deps, &ctx, schedule.schedule_id)
        .await
        .unwrap();
    assert_eq!(stored.start_time, time(10, 0));
}

#[tokio::test]
async fn test_update_schedule_ignores_past_and_cancelled_bookings() {
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    let ctx = OperationContext::default();

    // 過去になった予約
    book(&env, schedule.schedule_id, "2025-06-04").await;
    // キャンセル済みの予約
    let cancelled = book(&env, schedule.schedule_id, "2025-06-18").await;
    cancel_booking(
        &env.deps,
        &ctx,
        CancelBooking {
            booking_id: cancelled.booking_id,
            user_id: UserId::new(CUSTOMER_ID),
            cancelled_at: at(2025, 6, 3, 9),
        },
    )
    .await
    .unwrap();

    let result = update_schedule(
        &env.deps,
        &ctx,
        time_change(schedule.schedule_id, at(2025, 6, 5, 9)),
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_schedule_price_allowed_with_bookings() {
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    book(&env, schedule.schedule_id, "2025-06-11").await;
    let ctx = OperationContext::default();

    let updated = update_schedule(
        &env.deps,
        &ctx,
        UpdateSchedule {
            schedule_id: schedule.schedule_id,
            day_of_week: None,
            start_time: None,
            end_time: None,
            price: Some(120_000),
            updated_at: at(2025, 6, 3, 9),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.price.amount(), 120_000);
    assert_eq!(updated.day_of_week, schedule.day_of_week);
}

#[tokio::test]
async fn test_update_schedule_revalidates_merged_schedule() {
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    let ctx = OperationContext::default();

    // 終了時刻だけを開始時刻より前に
    let result = update_schedule(
        &env.deps,
        &ctx,
        UpdateSchedule {
            schedule_id: schedule.schedule_id,
            day_of_week: None,
            start_time: None,
            end_time: Some("09:00".to_string()),
            price: None,
            updated_at: at(2025, 6, 3, 9),
        },
    )
    .await;
    assert!(matches!(result, Err(ScheduleError::InvalidTimeRange)));

    let result = update_schedule(
        &env.deps,
        &ctx,
        UpdateSchedule {
            schedule_id: schedule.schedule_id,
            day_of_week: Some(0),
            start_time: None,
            end_time: None,
            price: None,
            updated_at: at(2025, 6, 3, 9),
        },
    )
    .await;
    assert!(matches!(result, Err(ScheduleError::InvalidDayOfWeek)));
}

#[tokio::test]
async fn test_update_schedule_validation_precedes_booking_guard() {
    // Arrange: 予約のある枠
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    book(&env, schedule.schedule_id, "2025-06-11").await;
    let ctx = OperationContext::default();

    // Act: 終了時刻を開始時刻より前にする
    let result = update_schedule(
        &env.deps,
        &ctx,
        UpdateSchedule {
            schedule_id: schedule.schedule_id,
            day_of_week: None,
            start_time: None,
            end_time: Some("09:00".to_string()),
            price: None,
            updated_at: at(2025, 6, 3, 9),
        },
    )
    .await;

    // Assert: 予約の有無より先に枠の検証エラーになる
    assert!(matches!(result, Err(ScheduleError::InvalidTimeRange)));
}

#[tokio::test]
async fn test_update_schedule_resubmitting_same_slot_with_bookings() {
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    book(&env, schedule.schedule_id, "2025-06-11").await;
    let ctx = OperationContext::default();

    // 現在と同じ曜日・時間帯を指定し、料金だけ変える
    let updated = update_schedule(
        &env.deps,
        &ctx,
        UpdateSchedule {
            schedule_id: schedule.schedule_id,
            day_of_week: Some(3),
            start_time: Some("10:00".to_string()),
            end_time: Some("12:00".to_string()),
            price: Some(110_000),
            updated_at: at(2025, 6, 3, 9),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.price.amount(), 110_000);
    assert_eq!(updated.start_time, schedule.start_time);
}

#[tokio::test]
async fn test_update_and_delete_schedule_with_expired_context() {
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;

    let expired = OperationContext::with_deadline(tokio::time::Instant::now());
    let cancelled = OperationContext::with_timeout(std::time::Duration::from_secs(5));
    cancelled.cancellation_token().cancel();

    for ctx in [expired, cancelled] {
        let result = update_schedule(
            &env.deps,
            &ctx,
            time_change(schedule.schedule_id, at(2025, 6, 3, 9)),
        )
        .await;
        assert!(matches!(result, Err(ScheduleError::Timeout)));

        let result = delete_schedule(
            &env.deps,
            &ctx,
            DeleteSchedule {
                schedule_id: schedule.schedule_id,
                deleted_at: at(2025, 6, 3, 9),
            },
        )
        .await;
        assert!(matches!(result, Err(ScheduleError::Timeout)));
    }

    // 変更も削除もされていない
    let stored = env.schedules.get_raw(schedule.schedule_id).unwrap();
    assert_eq!(stored.start_time, schedule.start_time);
    assert!(stored.deleted_at.is_none());
}

#[tokio::test]
async fn test_update_schedule_not_found() {
    let env = TestEnv::new();
    let ctx = OperationContext::default();

    let result = update_schedule(
        &env.deps,
        &ctx,
        time_change(ScheduleId::new(42), at(2025, 6, 3, 9)),
    )
    .await;

    assert!(matches!(result, Err(ScheduleError::ScheduleNotFound)));
}

// ============================================================================
// スケジュールの削除
// ============================================================================

#[tokio::test]
async fn test_delete_schedule_success() {
    // Arrange
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    let ctx = OperationContext::default();
    let deleted_at = at(2025, 6, 3, 9);

    // Act
    delete_schedule(
        &env.deps,
        &ctx,
        DeleteSchedule {
            schedule_id: schedule.schedule_id,
            deleted_at,
        },
    )
    .await
    .unwrap();

    // Assert: 論理削除のため行は残る
    let raw = env.schedules.get_raw(schedule.schedule_id).unwrap();
    assert_eq!(raw.deleted_at, Some(deleted_at));

    let result = get_schedule(&env.deps, &ctx, schedule.schedule_id).await;
    assert!(matches!(result, Err(ScheduleError::ScheduleNotFound)));

    // 削除済みの枠は予約できない
    let result = create_booking(
        &env.deps,
        &ctx,
        CreateBooking {
            schedule_id: schedule.schedule_id,
            booking_date: "2025-06-11".to_string(),
            user_id: UserId::new(CUSTOMER_ID),
            requested_at: monday_morning(),
        },
    )
    .await;
    assert!(matches!(result, Err(BookingError::ScheduleNotFound)));
}

#[tokio::test]
async fn test_delete_schedule_blocked_by_upcoming_booking() {
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    book(&env, schedule.schedule_id, "2025-06-11").await;
    let ctx = OperationContext::default();

    let result = delete_schedule(
        &env.deps,
        &ctx,
        DeleteSchedule {
            schedule_id: schedule.schedule_id,
            deleted_at: at(2025, 6, 3, 9),
        },
    )
    .await;

    assert!(matches!(result, Err(ScheduleError::ScheduleHasBookings)));
    assert!(
        env.schedules
            .get_raw(schedule.schedule_id)
            .unwrap()
            .deleted_at
            .is_none()
    );
}

#[tokio::test]
async fn test_delete_schedule_twice_fails() {
    let env = TestEnv::new();
    let schedule = env.wednesday_schedule().await;
    let ctx = OperationContext::default();
    let cmd = DeleteSchedule {
        schedule_id: schedule.schedule_id,
        deleted_at: at(2025, 6, 3, 9),
    };

    delete_schedule(&env.deps, &ctx, cmd.clone()).await.unwrap();
    let result = delete_schedule(&env.deps, &ctx, cmd).await;

    assert!(matches!(result, Err(ScheduleError::ScheduleNotFound)));
}
