use super::{BookingStatus, DayOfWeek};

/// スケジュール定義のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleValidationError {
    /// 曜日が 1..=7 の範囲外
    InvalidDayOfWeek,
    /// 終了時刻が開始時刻以前
    InvalidTimeRange,
    /// 料金が 0 以下
    InvalidPrice,
    /// 時刻が HH:MM 形式でない
    InvalidTimeFormat,
}

impl std::fmt::Display for ScheduleValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            ScheduleValidationError::InvalidDayOfWeek => "day of week must be between 1-7",
            ScheduleValidationError::InvalidTimeRange => "end time must be after start time",
            ScheduleValidationError::InvalidPrice => "price must be positive",
            ScheduleValidationError::InvalidTimeFormat => "invalid time format, use HH:MM",
        };
        f.write_str(message)
    }
}

/// 予約リクエスト検証のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    /// YYYY-MM-DD として解釈できない
    InvalidBookingDate,
    /// 今日より前の日付
    PastDateBooking,
    /// 予約日の曜日がスケジュールの曜日と一致しない
    DayMismatch {
        booking_day: DayOfWeek,
        schedule_day: DayOfWeek,
    },
}

/// キャンセルのエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelBookingError {
    /// 予約の所有者ではない
    Forbidden,
    /// 既に終了状態（キャンセル済み・完了）
    InvalidStateTransition(BookingStatus),
}
