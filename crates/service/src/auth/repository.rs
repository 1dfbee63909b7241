use async_trait::async_trait;
use uuid::Uuid;

use super::domain::UserRecord;
use super::errors::AuthError;

/// Persistence abstraction owning user records.
///
/// Uniqueness of `email` and `username` is ultimately enforced by the
/// backing store (unique indexes); `create` surfaces a violation as a
/// `Store` error. Structural field checks surface as `Validation`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn create(&self, email: &str, username: &str, password_hash: String) -> Result<UserRecord, AuthError>;
    async fn update_password(&self, user_id: Uuid, password_hash: String) -> Result<(), AuthError>;
}

/// Simple in-memory mock store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryUserStore {
        users: Mutex<HashMap<Uuid, UserRecord>>, // key: user id
    }

    #[async_trait]
    impl UserStore for InMemoryUserStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.username == username).cloned())
        }

        async fn create(&self, email: &str, username: &str, password_hash: String) -> Result<UserRecord, AuthError> {
            if !email.contains('@') {
                return Err(AuthError::Validation("invalid email".into()));
            }
            if username.trim().is_empty() {
                return Err(AuthError::Validation("username required".into()));
            }
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == email || u.username == username) {
                // stands in for the unique indexes of the real store
                return Err(AuthError::Store("unique constraint violated".into()));
            }
            let user = UserRecord {
                id: Uuid::new_v4(),
                email: email.to_string(),
                username: username.to_string(),
                password_hash,
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn update_password(&self, user_id: Uuid, password_hash: String) -> Result<(), AuthError> {
            let mut users = self.users.lock().unwrap();
            match users.get_mut(&user_id) {
                Some(u) => {
                    u.password_hash = password_hash;
                    Ok(())
                }
                None => Err(AuthError::UserNotFound),
            }
        }
    }
}
