use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, FieldId, ScheduleId, UserId};

/// コマンド：枠を予約する
///
/// `booking_date`は境界層から受け取った文字列のまま渡す（YYYY-MM-DD）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBooking {
    pub schedule_id: ScheduleId,
    pub booking_date: String,
    pub user_id: UserId,
    pub requested_at: DateTime<Utc>,
}

/// コマンド：予約をキャンセルする
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub cancelled_at: DateTime<Utc>,
}

/// コマンド：スケジュールを登録する（管理者）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSchedule {
    pub field_id: FieldId,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub price: i64,
}

/// コマンド：スケジュールを更新する（管理者）
///
/// `None` の項目は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSchedule {
    pub schedule_id: ScheduleId,
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub price: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

/// コマンド：スケジュールを削除する（管理者）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSchedule {
    pub schedule_id: ScheduleId,
    pub deleted_at: DateTime<Utc>,
}
