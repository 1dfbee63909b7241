use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::warn;
use uuid::Uuid;

use crate::auth::domain::UserRecord;
use crate::auth::errors::AuthError;
use crate::auth::repository::UserStore;
use crate::auth::tokens::RefreshTokenStore;

fn to_record(m: models::user::Model) -> UserRecord {
    UserRecord {
        id: m.id,
        email: m.email,
        username: m.username,
        password_hash: m.password_hash,
    }
}

/// [`UserStore`] over the `user` table.
pub struct SeaOrmUserStore {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserStore for SeaOrmUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        let res = models::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(res.map(to_record))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let res = models::user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(res.map(to_record))
    }

    async fn create(&self, email: &str, username: &str, password_hash: String) -> Result<UserRecord, AuthError> {
        let created = models::user::create(&self.db, email, username, &password_hash)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
                other => {
                    if other.is_unique_violation() {
                        // a concurrent insert won the race behind the pre-check
                        warn!(email, username, "unique index rejected user insert");
                    }
                    AuthError::Store(other.to_string())
                }
            })?;
        Ok(to_record(created))
    }

    async fn update_password(&self, user_id: Uuid, password_hash: String) -> Result<(), AuthError> {
        models::user::update_password(&self.db, user_id, &password_hash)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Validation(_) => AuthError::UserNotFound,
                other => AuthError::Store(other.to_string()),
            })?;
        Ok(())
    }
}

/// [`RefreshTokenStore`] over the `refresh_token` table.
pub struct SeaOrmRefreshTokenStore {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl RefreshTokenStore for SeaOrmRefreshTokenStore {
    async fn record(&self, jti: Uuid, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), AuthError> {
        models::refresh_token::record(&self.db, jti, user_id, expires_at)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }

    async fn revoke(&self, jti: Uuid) -> Result<(), AuthError> {
        models::refresh_token::revoke(&self.db, jti)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }

    async fn is_active(&self, jti: Uuid) -> Result<bool, AuthError> {
        let found = models::refresh_token::find(&self.db, jti)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(matches!(found, Some(rec) if rec.revoked_at.is_none() && rec.expires_at > Utc::now()))
    }
}
