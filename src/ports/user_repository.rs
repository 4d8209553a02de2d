use crate::domain::UserId;
use async_trait::async_trait;

use super::Result;

/// ユーザーの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Customer => "CUSTOMER",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "CUSTOMER" => Ok(Role::Customer),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// ユーザー（ユーザー管理コンテキストの投影）
///
/// 予約コンテキストは存在確認と所有関係にのみ使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub role: Role,
}

/// ユーザーリポジトリポート
///
/// 予約コンテキストとユーザー管理コンテキストの境界を維持する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// IDでユーザーを取得する
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>>;
}
