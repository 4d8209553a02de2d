use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DayOfWeek, FieldId, Price, ScheduleId, ScheduleValidationError, VenueId};

/// 時刻入力のフォーマット（HH:MM）
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Schedule - コート1面の週次の予約枠
///
/// 曜日・時間帯・料金の組。特定の日付は持たず、毎週繰り返される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub schedule_id: ScheduleId,

    // 他の集約への参照（IDのみ）
    pub field_id: FieldId,
    pub venue_id: VenueId,

    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price: Price,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 未保存のスケジュール（IDとタイムスタンプは永続化層が付与する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub field_id: FieldId,
    pub venue_id: VenueId,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price: Price,
}

/// スケジュールの部分更新。`None` の項目は現在値を維持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleUpdate {
    pub day_of_week: Option<i32>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub price: Option<i64>,
}

/// 純粋関数：スケジュール定義の検証
///
/// 検証順序：
/// 1. 曜日が 1..=7 であること
/// 2. 終了時刻が開始時刻より後であること
/// 3. 料金が正であること
pub fn validate(
    day_of_week: i32,
    start_time: NaiveTime,
    end_time: NaiveTime,
    price: i64,
) -> Result<(), ScheduleValidationError> {
    DayOfWeek::try_from(day_of_week)?;

    if end_time <= start_time {
        return Err(ScheduleValidationError::InvalidTimeRange);
    }

    Price::try_new(price)?;

    Ok(())
}

/// 純粋関数：HH:MM 形式の時刻を解釈する
///
/// 時・分はゼロ埋め2桁。前後の空白は受け付けない。
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ScheduleValidationError> {
    NaiveTime::parse_from_str(input, TIME_OF_DAY_FORMAT)
        .ok()
        .filter(|time| time.format(TIME_OF_DAY_FORMAT).to_string() == input)
        .ok_or(ScheduleValidationError::InvalidTimeFormat)
}

impl NewSchedule {
    /// 検証済みの新規スケジュールを生成する
    pub fn try_new(
        field_id: FieldId,
        venue_id: VenueId,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
        price: i64,
    ) -> Result<Self, ScheduleValidationError> {
        validate(day_of_week, start_time, end_time, price)?;

        Ok(Self {
            field_id,
            venue_id,
            day_of_week: DayOfWeek::try_from(day_of_week)?,
            start_time,
            end_time,
            price: Price::try_new(price)?,
        })
    }
}

impl Schedule {
    /// 部分更新を適用した新しいスケジュールを返す
    ///
    /// 変更されなかった項目も含めて、更新後の枠全体を再検証する。
    /// 既存予約の料金はスナップショットのため、料金変更の影響を受けない。
    pub fn apply_update(
        &self,
        update: &ScheduleUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Schedule, ScheduleValidationError> {
        let day_of_week = update
            .day_of_week
            .unwrap_or_else(|| i32::from(self.day_of_week));
        let start_time = update.start_time.unwrap_or(self.start_time);
        let end_time = update.end_time.unwrap_or(self.end_time);
        let price = update.price.unwrap_or(self.price.amount());

        validate(day_of_week, start_time, end_time, price)?;

        Ok(Schedule {
            day_of_week: DayOfWeek::try_from(day_of_week)?,
            start_time,
            end_time,
            price: Price::try_new(price)?,
            updated_at,
            ..self.clone()
        })
    }

    /// 曜日と時間帯が同じか（料金は比較しない）
    pub fn occupies_same_slot(&self, other: &Schedule) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_time == other.start_time
            && self.end_time == other.end_time
    }
}
