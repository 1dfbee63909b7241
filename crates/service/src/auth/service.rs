use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{LoginInput, RegisterInput, ResetPasswordInput, TokenPair, UserRecord};
use super::errors::AuthError;
use super::password;
use super::repository::UserStore;
use super::tokens::{TokenClaims, TokenIssuer};

/// Auth business service independent of web framework
pub struct AuthService {
    store: Arc<dyn UserStore>,
    issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    /// Look up a user by exact email match first, then exact username match.
    async fn resolve_identifier(&self, identifier: &str) -> Result<Option<UserRecord>, AuthError> {
        if let Some(user) = self.store.find_by_email(identifier).await? {
            return Ok(Some(user));
        }
        self.store.find_by_username(identifier).await
    }

    /// Register a new user with a hashed password.
    ///
    /// Inputs are trimmed and the email lowercased before the duplicate
    /// checks run. No tokens are issued; the caller logs in separately.
    ///
    /// # Examples
    /// ```
    /// use service::auth::domain::RegisterInput;
    /// use service::auth::repository::mock::InMemoryUserStore;
    /// use service::auth::tokens::mock::InMemoryRefreshTokenStore;
    /// use service::auth::tokens::{JwtTokenIssuer, TokenConfig};
    /// use service::auth::AuthService;
    /// use std::sync::Arc;
    /// let cfg = TokenConfig { secret: "secret".into(), access_ttl_secs: 900, refresh_ttl_secs: 86_400 };
    /// let issuer = Arc::new(JwtTokenIssuer::new(cfg, Arc::new(InMemoryRefreshTokenStore::default())));
    /// let svc = AuthService::new(Arc::new(InMemoryUserStore::default()), issuer);
    /// let input = RegisterInput { email: " User@Example.com ".into(), username: "tester".into(), password: "Secret1!".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<UserRecord, AuthError> {
        let email = input.email.trim().to_lowercase();
        let username = input.username.trim().to_string();
        let password = input.password.trim().to_string();

        if self.store.find_by_email(&email).await?.is_some() {
            debug!("email taken");
            return Err(AuthError::DuplicateEmail);
        }
        if self.store.find_by_username(&username).await?.is_some() {
            debug!("username taken");
            return Err(AuthError::DuplicateUsername);
        }
        password::validate_strength(&password)?;

        let hash = password::hash_password(&password)?;
        let user = self.store.create(&email, &username, hash).await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate by email-or-username identifier and issue a token pair.
    ///
    /// Every successful login mints a brand-new pair; prior tokens are
    /// neither reused nor revoked here.
    ///
    /// # Examples
    /// ```
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use service::auth::repository::mock::InMemoryUserStore;
    /// use service::auth::tokens::mock::InMemoryRefreshTokenStore;
    /// use service::auth::tokens::{JwtTokenIssuer, TokenConfig};
    /// use service::auth::AuthService;
    /// use std::sync::Arc;
    /// let cfg = TokenConfig { secret: "secret".into(), access_ttl_secs: 900, refresh_ttl_secs: 86_400 };
    /// let issuer = Arc::new(JwtTokenIssuer::new(cfg, Arc::new(InMemoryRefreshTokenStore::default())));
    /// let svc = AuthService::new(Arc::new(InMemoryUserStore::default()), issuer);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), username: "u".into(), password: "Passw0rd!".into() }));
    /// let pair = tokio_test::block_on(svc.login(LoginInput { identifier: "u@e.com".into(), password: "Passw0rd!".into() })).unwrap();
    /// assert!(!pair.access.is_empty());
    /// assert_ne!(pair.access, pair.refresh);
    /// ```
    #[instrument(skip(self, input), fields(identifier = %input.identifier))]
    pub async fn login(&self, input: LoginInput) -> Result<TokenPair, AuthError> {
        let identifier = input.identifier.trim().to_lowercase();
        let password = input.password.trim().to_string();

        if identifier.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let user = self
            .resolve_identifier(&identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !password::verify_password(&password, &user.password_hash)? {
            return Err(AuthError::InvalidPassword);
        }

        let pair = self.issuer.issue_pair(&user).await?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(pair)
    }

    /// Overwrite a user's password by bare identifier.
    ///
    /// The identifier is matched verbatim on this path: no trimming or
    /// lowercasing, unlike [`AuthService::login`]. No proof of account
    /// ownership is required and no issued tokens are revoked; any caller
    /// knowing a valid email or username can rotate that account's password.
    #[instrument(skip(self, input), fields(identifier = %input.identifier))]
    pub async fn reset_password(&self, input: ResetPasswordInput) -> Result<(), AuthError> {
        if input.identifier.is_empty() || input.new_password.is_empty() || input.confirm_password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if input.new_password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let user = self
            .resolve_identifier(&input.identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // note: the new password bypasses the registration strength gate
        let hash = password::hash_password(&input.new_password)?;
        self.store.update_password(user.id, hash).await?;
        info!(user_id = %user.id, "password_reset");
        Ok(())
    }

    /// Exchange a refresh token for a brand-new pair, revoking the old one.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::MissingFields);
        }
        self.issuer.rotate(refresh_token).await
    }

    /// Validate a bearer access token and return its claims.
    pub fn verify_access(&self, access_token: &str) -> Result<TokenClaims, AuthError> {
        self.issuer.verify_access(access_token)
    }
}
