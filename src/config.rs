use std::time::Duration;
use thiserror::Error;

/// 既定のリクエスト実行期限（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/futsal_booking";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 数値として解釈できない環境変数
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// 予約コアの設定
///
/// 環境変数:
/// - `DATABASE_URL`: PostgreSQL接続文字列
/// - `DATABASE_MAX_CONNECTIONS`: コネクションプールの最大数
/// - `BOOKING_REQUEST_TIMEOUT_SECS`: 1操作あたりの実行期限
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub request_timeout: Duration,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl BookingConfig {
    /// プロセスの環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// 未設定の項目は既定値を使う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => parse_number("DATABASE_MAX_CONNECTIONS", value)?,
            None => defaults.max_connections,
        };

        let request_timeout = match lookup("BOOKING_REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                Duration::from_secs(parse_number("BOOKING_REQUEST_TIMEOUT_SECS", value)?)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            database_url,
            max_connections,
            request_timeout,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
