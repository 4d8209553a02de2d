use crate::domain::{FieldId, VenueId};
use async_trait::async_trait;

use super::Result;

/// コート情報ポート
///
/// 予約コンテキストと施設管理コンテキストの境界を維持する。
/// 予約コンテキストはコートの存在と所属施設だけを知る。
#[async_trait]
pub trait FieldDirectory: Send + Sync {
    /// コートが所属する施設を取得する
    ///
    /// コートが存在しない場合は`None`を返す。
    async fn venue_of(&self, field_id: FieldId) -> Result<Option<VenueId>>;
}
