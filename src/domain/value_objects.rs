use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ScheduleValidationError;

/// 永続化層が採番する数値IDの newtype を定義する
///
/// 0 は「未指定」を表し、永続化済みのIDとしては現れない。
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> u64 {
                self.0
            }

            /// 未指定（0）かどうか
            pub fn is_unset(&self) -> bool {
                self.0 == 0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// 予約ID - 予約集約の識別子
    BookingId
);
numeric_id!(
    /// スケジュールID - 週次の枠定義の識別子
    ScheduleId
);
numeric_id!(
    /// ユーザーID - ユーザー管理コンテキストへの参照
    UserId
);
numeric_id!(
    /// コートID - 施設管理コンテキストへの参照
    FieldId
);
numeric_id!(
    /// 施設ID - 施設管理コンテキストへの参照
    VenueId
);

/// 曜日（1=月曜 .. 7=日曜）
///
/// 不変条件：値は必ず 1..=7 の範囲。
/// 範囲外の値は型として存在できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const MONDAY: Self = Self(1);
    pub const WEDNESDAY: Self = Self(3);
    pub const SUNDAY: Self = Self(7);

    /// 日付の曜日を求める
    ///
    /// 日曜始まりの番号（日曜=0）を使い、日曜だけを 7 に読み替える。
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday().num_days_from_sunday() {
            0 => Self(7),
            n => Self(n as u8),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for DayOfWeek {
    type Error = ScheduleValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if !(1..=7).contains(&value) {
            return Err(ScheduleValidationError::InvalidDayOfWeek);
        }
        Ok(Self(value as u8))
    }
}

impl From<DayOfWeek> for i32 {
    fn from(day: DayOfWeek) -> Self {
        i32::from(day.0)
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 料金（通貨の最小単位ではなく整数の金額）
///
/// 不変条件：正の値のみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    /// # エラー
    /// 0 以下の場合は`ScheduleValidationError::InvalidPrice`を返す
    pub fn try_new(amount: i64) -> Result<Self, ScheduleValidationError> {
        if amount <= 0 {
            return Err(ScheduleValidationError::InvalidPrice);
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Price {
    type Error = ScheduleValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}
