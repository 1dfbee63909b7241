use thiserror::Error;

/// Business errors for auth workflows.
///
/// The client-facing variants carry the exact wording returned to callers;
/// the `Hash`/`Token`/`Store` variants are internal failure categories that
/// surface upstream as a generic internal error.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("Email already exists. Please use a different email.")]
    DuplicateEmail,
    #[error("Username already exists. Please choose a different username.")]
    DuplicateUsername,
    #[error("Password must have at least 6 characters, including one uppercase, one lowercase, one number, and one special character.")]
    WeakPassword,
    #[error("All fields are required.")]
    MissingFields,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Token is invalid or expired")]
    InvalidToken,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("storage error: {0}")]
    Store(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::DuplicateEmail => 1002,
            AuthError::DuplicateUsername => 1003,
            AuthError::WeakPassword => 1004,
            AuthError::MissingFields => 1005,
            AuthError::PasswordMismatch => 1006,
            AuthError::UserNotFound => 1007,
            AuthError::InvalidPassword => 1008,
            AuthError::InvalidToken => 1009,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Store(_) => 1200,
        }
    }
}
