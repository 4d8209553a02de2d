use crate::domain::UserId;
use crate::ports::Result;
use crate::ports::user_repository::{Role, User, UserRepository as UserRepositoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::str::FromStr;

use super::{id_to_db, invalid_data};

/// PostgreSQL implementation of UserRepository
///
/// Reads the users projection owned by the user management context.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT role
            FROM users
            WHERE user_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id_to_db("user_id", user_id.value())?)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role_str: &str = row.get("role");
        let role = Role::from_str(role_str).map_err(invalid_data)?;

        Ok(Some(User { user_id, role }))
    }
}
