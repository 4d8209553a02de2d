use thiserror::Error;

use crate::application::context::DeadlineExceeded;
use crate::domain::{BookingStatus, BookingValidationError, CancelBookingError, DayOfWeek};
use crate::ports::BoxError;

/// 予約アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingError {
    /// 必須項目の欠落（0のID、空の日付など）
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    /// 予約日が YYYY-MM-DD でない
    #[error("invalid booking date")]
    InvalidBookingDate,

    /// 過去日付の予約
    #[error("cannot book past date")]
    PastDateBooking,

    /// 予約日の曜日がスケジュールと一致しない
    #[error("booking date falls on day {booking_day} but schedule is for day {schedule_day}")]
    DayMismatch {
        booking_day: DayOfWeek,
        schedule_day: DayOfWeek,
    },

    /// スケジュールが存在しない
    #[error("schedule not found")]
    ScheduleNotFound,

    /// ユーザーが存在しない
    #[error("user not found")]
    UserNotFound,

    /// 予約が存在しない
    #[error("booking not found")]
    BookingNotFound,

    /// 予約の所有者ではない
    #[error("forbidden: booking belongs to another user")]
    Forbidden,

    /// 終了状態の予約への操作
    #[error("cannot cancel booking with status: {0}")]
    InvalidStateTransition(BookingStatus),

    /// 同じ枠・同じ日付に有効な予約が既にある
    #[error("slot already booked for this date")]
    SlotAlreadyBooked,

    /// 実行期限切れ、またはキャンセル
    #[error("operation timed out")]
    Timeout,

    /// 協調者（リポジトリ）の障害
    #[error("internal error: {context}")]
    Internal {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl BookingError {
    pub(crate) fn internal(context: &'static str) -> impl FnOnce(BoxError) -> Self {
        move |source| {
            tracing::error!(error = %source, "{}", context);
            BookingError::Internal { context, source }
        }
    }
}

impl From<BookingValidationError> for BookingError {
    fn from(err: BookingValidationError) -> Self {
        match err {
            BookingValidationError::InvalidBookingDate => BookingError::InvalidBookingDate,
            BookingValidationError::PastDateBooking => BookingError::PastDateBooking,
            BookingValidationError::DayMismatch {
                booking_day,
                schedule_day,
            } => BookingError::DayMismatch {
                booking_day,
                schedule_day,
            },
        }
    }
}

impl From<CancelBookingError> for BookingError {
    fn from(err: CancelBookingError) -> Self {
        match err {
            CancelBookingError::Forbidden => BookingError::Forbidden,
            CancelBookingError::InvalidStateTransition(status) => {
                BookingError::InvalidStateTransition(status)
            }
        }
    }
}

impl From<DeadlineExceeded> for BookingError {
    fn from(_: DeadlineExceeded) -> Self {
        BookingError::Timeout
    }
}

/// 予約アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingError>;
