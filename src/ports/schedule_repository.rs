use crate::domain::{FieldId, NewSchedule, Schedule, ScheduleId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Result;

/// スケジュールリポジトリポート
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// IDでスケジュールを取得する（論理削除済みは含まない）
    async fn find_by_id(&self, schedule_id: ScheduleId) -> Result<Option<Schedule>>;

    /// コートの全スケジュールを曜日・開始時刻順に取得する
    async fn find_by_field_id(&self, field_id: FieldId) -> Result<Vec<Schedule>>;

    /// 新しいスケジュールを保存し、ID付きのスケジュールを返す
    async fn create(&self, schedule: NewSchedule) -> Result<Schedule>;

    /// スケジュールを上書き保存する
    ///
    /// 対象が存在しない場合は`false`を返す。
    async fn update(&self, schedule: &Schedule) -> Result<bool>;

    /// スケジュールを論理削除する
    ///
    /// 対象が存在しない場合は`false`を返す。
    async fn delete(&self, schedule_id: ScheduleId, deleted_at: DateTime<Utc>) -> Result<bool>;
}
