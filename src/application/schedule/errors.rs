use thiserror::Error;

use crate::application::context::DeadlineExceeded;
use crate::domain::ScheduleValidationError;
use crate::ports::BoxError;

/// スケジュール管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// 必須項目の欠落（0のIDなど）
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    #[error("day of week must be between 1-7")]
    InvalidDayOfWeek,

    #[error("end time must be after start time")]
    InvalidTimeRange,

    #[error("price must be positive")]
    InvalidPrice,

    #[error("invalid time format, use HH:MM")]
    InvalidTimeFormat,

    /// コートが存在しない
    #[error("field not found")]
    FieldNotFound,

    /// スケジュールが存在しない
    #[error("schedule not found")]
    ScheduleNotFound,

    /// 今日以降の有効な予約があるため変更不可
    #[error("cannot modify schedule with existing bookings")]
    ScheduleHasBookings,

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

impl ScheduleError {
    pub(crate) fn internal(context: &'static str) -> impl FnOnce(BoxError) -> Self {
        move |source| {
            tracing::error!(error = %source, "{}", context);
            ScheduleError::Internal { context, source }
        }
    }
}

impl From<ScheduleValidationError> for ScheduleError {
    fn from(err: ScheduleValidationError) -> Self {
        match err {
            ScheduleValidationError::InvalidDayOfWeek => ScheduleError::InvalidDayOfWeek,
            ScheduleValidationError::InvalidTimeRange => ScheduleError::InvalidTimeRange,
            ScheduleValidationError::InvalidPrice => ScheduleError::InvalidPrice,
            ScheduleValidationError::InvalidTimeFormat => ScheduleError::InvalidTimeFormat,
        }
    }
}

impl From<DeadlineExceeded> for ScheduleError {
    fn from(_: DeadlineExceeded) -> Self {
        ScheduleError::Timeout
    }
}

/// スケジュール管理アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ScheduleError>;
