//! # User Repository
//!
//! Operators who log in and ring up sales. Usernames are unique.

use std::sync::Arc;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::StoreInner;
use pdv_core::{NewUser, User};

/// Repository for operator records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    inner: Arc<StoreInner>,
}

impl UserRepository {
    pub(crate) fn new(inner: Arc<StoreInner>) -> Self {
        UserRepository { inner }
    }

    /// Creates a user.
    ///
    /// ## Errors
    /// - `UniqueViolation` if the username is already taken
    pub async fn create(&self, input: NewUser) -> StoreResult<User> {
        let mut tables = self.inner.tables.write().await;

        if tables.users.values().any(|u| u.username == input.username) {
            return Err(StoreError::duplicate("username", input.username));
        }

        let id = self.inner.ids.users.next_id();
        debug!(id, username = %input.username, "Creating user");

        let user = User {
            id,
            username: input.username,
            password_hash: input.password_hash,
            name: input.name,
            is_admin: input.is_admin,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.tables.read().await.users.get(&id).cloned())
    }

    pub async fn list_all(&self) -> StoreResult<Vec<User>> {
        Ok(self.inner.tables.read().await.users.values().cloned().collect())
    }

    /// First user whose username matches exactly (case-sensitive).
    pub async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.inner.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}
