use crate::application::{ServiceDependencies, context::OperationContext};
use crate::domain::{self, Booking, BookingId, UserId, booking_validator, commands::*};
use crate::ports::SaveBookingError;

use super::errors::{BookingError, Result};

/// 予約を作成する
///
/// ビジネスルール（この順に判定し、最初の違反で中断する）：
/// 1. ユーザーID・スケジュールID・予約日が指定されていること
/// 2. 予約日が YYYY-MM-DD であること
/// 3. 予約日が今日以降であること
/// 4. スケジュールが存在すること
/// 5. 予約日の曜日がスケジュールの曜日と一致すること
/// 6. ユーザーが存在すること
/// 7. 同じ枠・同じ日付に有効な予約がないこと
///
/// 料金は作成時点のスケジュール料金をコピーする。
///
/// # 一貫性保証
///
/// 7 の確認と保存の間に同じ枠への予約が割り込んだ場合も、
/// 永続化層の一意制約により`SlotAlreadyBooked`になる。
pub async fn create_booking(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    cmd: CreateBooking,
) -> Result<Booking> {
    // 1. 必須項目の確認（協調者を呼ぶ前に判定）
    if cmd.user_id.is_unset() || cmd.schedule_id.is_unset() || cmd.booking_date.is_empty() {
        return Err(BookingError::InvalidRequest(
            "user_id, schedule_id and booking_date are required",
        ));
    }

    ctx.ensure_active()?;

    // 2-3. 日付の検証
    let booking_date = booking_validator::parse_booking_date(&cmd.booking_date)
        .inspect_err(|_| {
            tracing::warn!(booking_date = %cmd.booking_date, "invalid booking date format");
        })?;

    booking_validator::check_not_past(booking_date, cmd.requested_at).inspect_err(|_| {
        tracing::warn!(%booking_date, "attempt to book past date");
    })?;

    // 4. スケジュールの取得
    let schedule = ctx
        .run(deps.schedule_repository.find_by_id(cmd.schedule_id))
        .await?
        .map_err(BookingError::internal("failed to load schedule"))?
        .ok_or_else(|| {
            tracing::warn!(schedule_id = %cmd.schedule_id, "schedule not found");
            BookingError::ScheduleNotFound
        })?;

    // 5. 曜日の一致
    booking_validator::check_day_of_week_match(booking_date, schedule.day_of_week).inspect_err(
        |_| {
            tracing::warn!(
                %booking_date,
                schedule_id = %schedule.schedule_id,
                schedule_day = %schedule.day_of_week,
                "booking date does not match schedule day"
            );
        },
    )?;

    // 6. ユーザーの存在確認
    let user = ctx
        .run(deps.user_repository.find_by_id(cmd.user_id))
        .await?
        .map_err(BookingError::internal("failed to load user"))?
        .ok_or_else(|| {
            tracing::warn!(user_id = %cmd.user_id, "user not found");
            BookingError::UserNotFound
        })?;

    // 7. 枠の空き確認
    let occupied = ctx
        .run(
            deps.booking_repository
                .find_active_for_slot(schedule.schedule_id, booking_date),
        )
        .await?
        .map_err(BookingError::internal("failed to check slot availability"))?;

    if let Some(existing) = occupied {
        tracing::warn!(
            schedule_id = %schedule.schedule_id,
            %booking_date,
            existing_booking_id = %existing.booking_id,
            "slot already booked for this date"
        );
        return Err(BookingError::SlotAlreadyBooked);
    }

    // 8. ドメイン層の純粋関数で予約を生成して保存
    let new_booking = domain::booking::open_booking(user.user_id, &schedule, booking_date);

    let booking = ctx
        .run(deps.booking_repository.create(new_booking))
        .await?
        .map_err(|err| match err {
            SaveBookingError::SlotTaken => {
                tracing::warn!(
                    schedule_id = %schedule.schedule_id,
                    %booking_date,
                    "slot taken by a concurrent booking"
                );
                BookingError::SlotAlreadyBooked
            }
            SaveBookingError::Backend(source) => {
                BookingError::internal("failed to create booking")(source)
            }
        })?;

    tracing::info!(
        booking_id = %booking.booking_id,
        user_id = %booking.user_id,
        schedule_id = %booking.schedule_id,
        booking_date = %booking.booking_date,
        "booking created successfully"
    );

    Ok(booking)
}

/// ユーザーの全予約を取得する
///
/// 予約が1件もない場合は空のリストを返す。
pub async fn get_my_bookings(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    user_id: UserId,
) -> Result<Vec<Booking>> {
    if user_id.is_unset() {
        return Err(BookingError::InvalidRequest("user_id is required"));
    }

    ctx.run(deps.booking_repository.find_by_user_id(user_id))
        .await?
        .map_err(BookingError::internal("failed to get user bookings"))
}

/// IDで予約を取得する
pub async fn get_booking_by_id(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    booking_id: BookingId,
) -> Result<Booking> {
    if booking_id.is_unset() {
        return Err(BookingError::InvalidRequest("booking_id is required"));
    }

    ctx.run(deps.booking_repository.find_by_id(booking_id))
        .await?
        .map_err(BookingError::internal("failed to load booking"))?
        .ok_or(BookingError::BookingNotFound)
}

/// 予約をキャンセルする
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 操作するユーザーが予約の所有者であること（状態より先に判定）
/// - 予約が終了状態（Cancelled, Completed）でないこと
pub async fn cancel_booking(
    deps: &ServiceDependencies,
    ctx: &OperationContext,
    cmd: CancelBooking,
) -> Result<()> {
    if cmd.booking_id.is_unset() || cmd.user_id.is_unset() {
        return Err(BookingError::InvalidRequest(
            "booking_id and user_id are required",
        ));
    }

    // 1. 予約の取得
    let booking = ctx
        .run(deps.booking_repository.find_by_id(cmd.booking_id))
        .await?
        .map_err(BookingError::internal("failed to load booking"))?
        .ok_or(BookingError::BookingNotFound)?;

    // 2. ドメイン層の純粋関数で状態遷移
    let cancelled = domain::booking::cancel_booking(&booking, cmd.user_id, cmd.cancelled_at)
        .inspect_err(|err| {
            tracing::warn!(
                booking_id = %booking.booking_id,
                actor = %cmd.user_id,
                status = %booking.status,
                reason = ?err,
                "booking cannot be cancelled"
            );
        })?;

    // 3. ステータスを保存
    let updated = ctx
        .run(deps.booking_repository.update_status(
            cancelled.booking_id,
            cancelled.status,
            cancelled.updated_at,
        ))
        .await?
        .map_err(BookingError::internal("failed to cancel booking"))?;

    if !updated {
        return Err(BookingError::BookingNotFound);
    }

    tracing::info!(booking_id = %cancelled.booking_id, "booking cancelled");

    Ok(())
}
