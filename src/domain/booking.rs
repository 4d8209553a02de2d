use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, CancelBookingError, Price, Schedule, ScheduleId, UserId};

/// 予約ステータス
///
/// 状態遷移：
/// - 作成時は常に Pending
/// - Pending / Confirmed → Cancelled（所有者のみ）
/// - Cancelled, Completed は終了状態
///
/// Confirmed と Completed へ遷移させる操作はこのクレートには存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// 作成直後
    Pending,
    /// 確定済み
    Confirmed,
    /// キャンセル済み
    Cancelled,
    /// 利用完了
    Completed,
}

impl BookingStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    /// 終了状態か（これ以上遷移できない）
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// 枠を占有している状態か
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            "COMPLETED" => Ok(BookingStatus::Completed),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// 未保存の予約（IDとタイムスタンプは永続化層が付与する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub user_id: UserId,
    pub schedule_id: ScheduleId,
    pub booking_date: NaiveDate,
    pub status: BookingStatus,
    pub total_price: Price,
}

/// Booking集約 - 1つの枠を特定の日付で1回予約したもの
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub booking_id: BookingId,

    // 他の集約への参照（IDのみ）
    pub user_id: UserId,
    pub schedule_id: ScheduleId,

    pub booking_date: NaiveDate,
    pub status: BookingStatus,
    /// 作成時点のスケジュール料金のスナップショット
    pub total_price: Price,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 純粋関数：予約を開始する
///
/// ビジネスルール：
/// - 状態は Pending
/// - 料金はスケジュールの現在の料金をコピーする（以後の料金変更は反映しない）
///
/// 日付の検証は`booking_validator`で事前に済ませておくこと。
pub fn open_booking(user_id: UserId, schedule: &Schedule, booking_date: NaiveDate) -> NewBooking {
    NewBooking {
        user_id,
        schedule_id: schedule.schedule_id,
        booking_date,
        status: BookingStatus::Pending,
        total_price: schedule.price,
    }
}

/// 純粋関数：予約をキャンセルする
///
/// ビジネスルール：
/// - 所有者以外はキャンセル不可（状態に関わらず先に判定する）
/// - Cancelled, Completed はキャンセル不可
///
/// 副作用なし。新しいBookingを返す。
pub fn cancel_booking(
    booking: &Booking,
    actor: UserId,
    cancelled_at: DateTime<Utc>,
) -> Result<Booking, CancelBookingError> {
    if booking.user_id != actor {
        return Err(CancelBookingError::Forbidden);
    }

    if booking.status.is_terminal() {
        return Err(CancelBookingError::InvalidStateTransition(booking.status));
    }

    Ok(Booking {
        status: BookingStatus::Cancelled,
        updated_at: cancelled_at,
        ..booking.clone()
    })
}
