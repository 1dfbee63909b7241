use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{TokenPair, UserRecord};
use super::errors::AuthError;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Claims carried by both access and refresh tokens; `token_type`
/// distinguishes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub token_type: String,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub jti: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// Signing configuration for [`JwtTokenIssuer`]
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

/// Issues and rotates token pairs bound to a user identity.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mint a fresh refresh token and derive an access token from it.
    async fn issue_pair(&self, user: &UserRecord) -> Result<TokenPair, AuthError>;
    /// Exchange a refresh token for a new pair, revoking the old one.
    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
    /// Validate an access token's signature, expiry and type.
    fn verify_access(&self, access_token: &str) -> Result<TokenClaims, AuthError>;
}

/// Persistence for issued refresh tokens, keyed by `jti`.
///
/// Rotation marks the presented token revoked; a token whose `jti` is
/// unknown, revoked or past its expiry is no longer active.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn record(&self, jti: Uuid, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), AuthError>;
    async fn revoke(&self, jti: Uuid) -> Result<(), AuthError>;
    async fn is_active(&self, jti: Uuid) -> Result<bool, AuthError>;
}

/// HS256 issuer backed by a [`RefreshTokenStore`] blacklist.
pub struct JwtTokenIssuer {
    cfg: TokenConfig,
    store: Arc<dyn RefreshTokenStore>,
}

impl JwtTokenIssuer {
    pub fn new(cfg: TokenConfig, store: Arc<dyn RefreshTokenStore>) -> Self {
        Self { cfg, store }
    }

    fn encode_claims(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &EncodingKey::from_secret(self.cfg.secret.as_bytes()))
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.cfg.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AuthError::InvalidToken)?;
        Ok(data.claims)
    }

    async fn mint_pair(&self, user_id: Uuid, username: &str, email: &str) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let refresh_exp = now + Duration::seconds(self.cfg.refresh_ttl_secs as i64);
        let refresh_claims = TokenClaims {
            token_type: TOKEN_TYPE_REFRESH.to_string(),
            user_id,
            username: username.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp() as usize,
            exp: refresh_exp.timestamp() as usize,
        };
        let access_claims = TokenClaims {
            token_type: TOKEN_TYPE_ACCESS.to_string(),
            jti: Uuid::new_v4(),
            exp: (now + Duration::seconds(self.cfg.access_ttl_secs as i64)).timestamp() as usize,
            ..refresh_claims.clone()
        };

        // only refresh tokens are recorded; access tokens live and die by exp
        self.store.record(refresh_claims.jti, user_id, refresh_exp).await?;

        Ok(TokenPair {
            access: self.encode_claims(&access_claims)?,
            refresh: self.encode_claims(&refresh_claims)?,
        })
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenIssuer {
    async fn issue_pair(&self, user: &UserRecord) -> Result<TokenPair, AuthError> {
        self.mint_pair(user.id, &user.username, &user.email).await
    }

    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.decode_claims(refresh_token)?;
        if claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(AuthError::InvalidToken);
        }
        if !self.store.is_active(claims.jti).await? {
            return Err(AuthError::InvalidToken);
        }
        // blacklist after rotation: the presented token is dead from here on
        self.store.revoke(claims.jti).await?;
        self.mint_pair(claims.user_id, &claims.username, &claims.email).await
    }

    fn verify_access(&self, access_token: &str) -> Result<TokenClaims, AuthError> {
        let claims = self.decode_claims(access_token)?;
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }
}

/// Simple in-memory refresh-token store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub struct Entry {
        pub user_id: Uuid,
        pub expires_at: DateTime<Utc>,
        pub revoked: bool,
    }

    #[derive(Default)]
    pub struct InMemoryRefreshTokenStore {
        entries: Mutex<HashMap<Uuid, Entry>>, // key: jti
    }

    #[async_trait]
    impl RefreshTokenStore for InMemoryRefreshTokenStore {
        async fn record(&self, jti: Uuid, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), AuthError> {
            let mut entries = self.entries.lock().unwrap();
            entries.insert(jti, Entry { user_id, expires_at, revoked: false });
            Ok(())
        }

        async fn revoke(&self, jti: Uuid) -> Result<(), AuthError> {
            let mut entries = self.entries.lock().unwrap();
            if let Some(e) = entries.get_mut(&jti) {
                e.revoked = true;
            }
            Ok(())
        }

        async fn is_active(&self, jti: Uuid) -> Result<bool, AuthError> {
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .get(&jti)
                .map(|e| !e.revoked && e.expires_at > Utc::now())
                .unwrap_or(false))
        }
    }
}
