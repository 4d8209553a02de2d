use crate::domain::{Booking, BookingId, BookingStatus, NewBooking, ScheduleId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use super::{BoxError, Result};

/// 予約の保存エラー
///
/// 枠の重複は永続化境界で検出されうるため、他の障害と区別して返す。
#[derive(Debug, Error)]
pub enum SaveBookingError {
    /// 同じ枠・同じ日付に有効な予約が既に存在する
    #[error("slot already booked for this date")]
    SlotTaken,

    /// ストレージの障害
    #[error("booking storage error")]
    Backend(#[source] BoxError),
}

/// 予約リポジトリポート
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 新しい予約を保存し、IDとタイムスタンプが付与された予約を返す
    ///
    /// 実装は (schedule_id, booking_date) について有効な予約
    /// （Pending, Confirmed）が1件までであることを保証し、
    /// 違反時は`SaveBookingError::SlotTaken`を返す。
    async fn create(&self, booking: NewBooking) -> std::result::Result<Booking, SaveBookingError>;

    /// IDで予約を取得する（論理削除済みは含まない）
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// ユーザーの全予約を取得する
    ///
    /// 予約日の新しい順に返す。
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Booking>>;

    /// 枠（スケジュール × 日付）を占有している予約を取得する
    async fn find_active_for_slot(
        &self,
        schedule_id: ScheduleId,
        booking_date: NaiveDate,
    ) -> Result<Option<Booking>>;

    /// 指定日以降の有効な予約の件数を数える
    ///
    /// スケジュールの更新・削除の可否判定に使用される。
    async fn count_active_from(&self, schedule_id: ScheduleId, from_date: NaiveDate)
    -> Result<u64>;

    /// 予約ステータスを更新する
    ///
    /// 対象が存在しない場合は`false`を返す。
    async fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;
}
