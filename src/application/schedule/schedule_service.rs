use crate::application::{ServiceDependencies, context::OperationContext};
use crate::domain::{
    FieldId, NewSchedule, Schedule, ScheduleId, ScheduleUpdate, commands::*, schedule,
};

use super::errors::{Result, ScheduleError};

/// スケジュールを登録する
///
/// ビジネスルール：
/// - コートIDが指定されていること
/// - 時刻が HH:MM であること
/// - 曜日が 1..=7、終了時刻が開始時刻より後、料金が正であること
/// - コートが存在すること
pub async fn create_schedule(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    cmd: CreateSchedule,
) -> Result<Schedule> {
    if cmd.field_id.is_unset() {
        return Err(ScheduleError::InvalidRequest("field_id is required"));
    }

    ctx.ensure_active()?;

    // 1. 枠定義の検証
    let start_time = schedule::parse_time_of_day(&cmd.start_time)?;
    let end_time = schedule::parse_time_of_day(&cmd.end_time)?;
    schedule::validate(cmd.day_of_week, start_time, end_time, cmd.price).inspect_err(|err| {
        tracing::warn!(field_id = %cmd.field_id, reason = %err, "invalid schedule definition");
    })?;

    // 2. コートの存在確認
    let venue_id = ctx
        .run(deps.field_directory.venue_of(cmd.field_id))
        .await?
        .map_err(ScheduleError::internal("failed to load field"))?
        .ok_or_else(|| {
            tracing::warn!(field_id = %cmd.field_id, "field not found when creating schedule");
            ScheduleError::FieldNotFound
        })?;

    // 3. 保存
    let new_schedule = NewSchedule::try_new(
        cmd.field_id,
        venue_id,
        cmd.day_of_week,
        start_time,
        end_time,
        cmd.price,
    )?;

    let schedule = ctx
        .run(deps.schedule_repository.create(new_schedule))
        .await?
        .map_err(ScheduleError::internal("failed to create schedule"))?;

    tracing::info!(
        schedule_id = %schedule.schedule_id,
        field_id = %schedule.field_id,
        "schedule created successfully"
    );

    Ok(schedule)
}

/// IDでスケジュールを取得する
pub async fn get_schedule(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    schedule_id: ScheduleId,
) -> Result<Schedule> {
    if schedule_id.is_unset() {
        return Err(ScheduleError::InvalidRequest("schedule_id is required"));
    }

    load_schedule(deps, ctx, schedule_id).await
}

/// コートの全スケジュールを取得する
pub async fn get_schedules_by_field(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    field_id: FieldId,
) -> Result<Vec<Schedule>> {
    if field_id.is_unset() {
        return Err(ScheduleError::InvalidRequest("field_id is required"));
    }

    ctx.run(deps.field_directory.venue_of(field_id))
        .await?
        .map_err(ScheduleError::internal("failed to load field"))?
        .ok_or(ScheduleError::FieldNotFound)?;

    ctx.run(deps.schedule_repository.find_by_field_id(field_id))
        .await?
        .map_err(ScheduleError::internal("failed to get schedules by field"))
}

/// スケジュールを更新する
///
/// ビジネスルール（この順に判定する）：
/// - 指定項目を反映した後の枠全体が検証を通ること
/// - 曜日・時間帯が実際に変わる場合、今日以降の有効な予約があれば変更不可
/// - 料金だけの変更は常に可能（既存予約の料金はスナップショットのため影響しない）
pub async fn update_schedule(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    cmd: UpdateSchedule,
) -> Result<Schedule> {
    if cmd.schedule_id.is_unset() {
        return Err(ScheduleError::InvalidRequest("schedule_id is required"));
    }

    ctx.ensure_active()?;

    let update = ScheduleUpdate {
        day_of_week: cmd.day_of_week,
        start_time: cmd
            .start_time
            .as_deref()
            .map(schedule::parse_time_of_day)
            .transpose()?,
        end_time: cmd
            .end_time
            .as_deref()
            .map(schedule::parse_time_of_day)
            .transpose()?,
        price: cmd.price,
    };

    let current = load_schedule(deps, ctx, cmd.schedule_id).await?;
    let updated = current.apply_update(&update, cmd.updated_at)?;

    if !updated.occupies_same_slot(&current) {
        ensure_no_upcoming_bookings(deps, ctx, &current, cmd.updated_at).await?;
    }

    let saved = ctx
        .run(deps.schedule_repository.update(&updated))
        .await?
        .map_err(ScheduleError::internal("failed to update schedule"))?;

    if !saved {
        return Err(ScheduleError::ScheduleNotFound);
    }

    tracing::info!(schedule_id = %updated.schedule_id, "schedule updated successfully");

    Ok(updated)
}

/// スケジュールを論理削除する
///
/// 今日以降の有効な予約がある場合は削除不可。
pub async fn delete_schedule(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    cmd: DeleteSchedule,
) -> Result<()> {
    if cmd.schedule_id.is_unset() {
        return Err(ScheduleError::InvalidRequest("schedule_id is required"));
    }

    let current = load_schedule(deps, ctx, cmd.schedule_id).await?;
    ensure_no_upcoming_bookings(deps, ctx, &current, cmd.deleted_at).await?;

    let deleted = ctx
        .run(
            deps.schedule_repository
                .delete(cmd.schedule_id, cmd.deleted_at),
        )
        .await?
        .map_err(ScheduleError::internal("failed to delete schedule"))?;

    if !deleted {
        return Err(ScheduleError::ScheduleNotFound);
    }

    tracing::info!(schedule_id = %cmd.schedule_id, "schedule deleted");

    Ok(())
}

async fn load_schedule(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    schedule_id: ScheduleId,
) -> Result<Schedule> {
    ctx.run(deps.schedule_repository.find_by_id(schedule_id))
        .await?
        .map_err(ScheduleError::internal("failed to load schedule"))?
        .ok_or(ScheduleError::ScheduleNotFound)
}

/// 今日以降に有効な予約が残っていないことを確認する
async fn ensure_no_upcoming_bookings(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    schedule: &Schedule,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<()> {
    let upcoming = ctx
        .run(
            deps.booking_repository
                .count_active_from(schedule.schedule_id, now.date_naive()),
        )
        .await?
        .map_err(ScheduleError::internal("failed to count schedule bookings"))?;

    if upcoming > 0 {
        tracing::warn!(
            schedule_id = %schedule.schedule_id,
            upcoming,
            "cannot modify schedule with existing bookings"
        );
        return Err(ScheduleError::ScheduleHasBookings);
    }

    Ok(())
}
