use chrono::{DateTime, NaiveDate, Utc};

use super::{BookingValidationError, DayOfWeek};

/// 予約日のフォーマット（YYYY-MM-DD）
pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d";

/// 純粋関数：予約日を解釈する
///
/// 月・日はゼロ埋め2桁、年は4桁。前後の空白や符号は受け付けない。
///
/// # エラー
/// YYYY-MM-DD として解釈できない場合は`InvalidBookingDate`を返す
pub fn parse_booking_date(input: &str) -> Result<NaiveDate, BookingValidationError> {
    NaiveDate::parse_from_str(input, BOOKING_DATE_FORMAT)
        .ok()
        // chrono は桁数の足りない数値や先頭の空白も受理するため、書式化し直して一致を確認する
        .filter(|date| date.format(BOOKING_DATE_FORMAT).to_string() == input)
        .ok_or(BookingValidationError::InvalidBookingDate)
}

/// 純粋関数：過去日付の予約を拒否する
///
/// ビジネスルール：
/// - 比較は日単位（UTC）で行う
/// - 当日の予約は受け付ける
pub fn check_not_past(
    booking_date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<(), BookingValidationError> {
    if booking_date < now.date_naive() {
        return Err(BookingValidationError::PastDateBooking);
    }
    Ok(())
}

/// 純粋関数：予約日の曜日とスケジュールの曜日の一致を確認する
pub fn check_day_of_week_match(
    booking_date: NaiveDate,
    schedule_day: DayOfWeek,
) -> Result<(), BookingValidationError> {
    let booking_day = DayOfWeek::of(booking_date);
    if booking_day != schedule_day {
        return Err(BookingValidationError::DayMismatch {
            booking_day,
            schedule_day,
        });
    }
    Ok(())
}
