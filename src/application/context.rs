use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::BookingConfig;

/// 実行期限切れ、またはキャンセル済み
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation deadline exceeded")]
pub struct DeadlineExceeded;

/// 1操作あたりの実行コンテキスト
///
/// 期限とキャンセルトークンを持つ。各サービス関数は入口と
/// 協調者の呼び出しの間で`ensure_active`を確認し、
/// 協調者の呼び出し自体は`run`で期限に縛る。
#[derive(Debug, Clone)]
pub struct OperationContext {
    deadline: Instant,
    cancellation: CancellationToken,
}

impl OperationContext {
    /// 現在時刻から`timeout`後を期限とする
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline,
            cancellation: CancellationToken::new(),
        }
    }

    /// 設定のリクエスト期限を使う
    pub fn from_config(config: &BookingConfig) -> Self {
        Self::with_timeout(config.request_timeout)
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// 呼び出し側が操作を中断するためのトークン
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn is_expired(&self) -> bool {
        self.cancellation.is_cancelled() || Instant::now() >= self.deadline
    }

    /// 期限内かつ未キャンセルであることを確認する
    pub fn ensure_active(&self) -> Result<(), DeadlineExceeded> {
        if self.is_expired() {
            tracing::warn!(
                cancelled = self.cancellation.is_cancelled(),
                "operation context expired"
            );
            return Err(DeadlineExceeded);
        }
        Ok(())
    }

    /// 期限とキャンセルを監視しながら`future`を実行する
    ///
    /// 期限切れ・キャンセル時は`future`をドロップして`DeadlineExceeded`を返す。
    /// 再試行は行わない。
    pub async fn run<F>(&self, future: F) -> Result<F::Output, DeadlineExceeded>
    where
        F: Future,
    {
        self.ensure_active()?;

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                tracing::warn!("operation cancelled while waiting on collaborator");
                Err(DeadlineExceeded)
            }
            _ = tokio::time::sleep_until(self.deadline) => {
                tracing::warn!("operation deadline exceeded while waiting on collaborator");
                Err(DeadlineExceeded)
            }
            output = future => Ok(output),
        }
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::from_config(&BookingConfig::default())
    }
}
