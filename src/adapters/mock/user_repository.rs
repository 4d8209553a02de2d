use crate::domain::UserId;
use crate::ports::Result;
use crate::ports::user_repository::{Role, User, UserRepository as UserRepositoryTrait};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Mock implementation of UserRepository
///
/// Supports stateful testing by registering users with a role.
pub struct UserRepository {
    users: Mutex<HashMap<UserId, Role>>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Add a user for testing purposes
    pub fn add_user(&self, user_id: UserId, role: Role) {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id, role);
    }
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get(&user_id).map(|role| User {
            user_id,
            role: *role,
        }))
    }
}
