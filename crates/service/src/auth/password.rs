use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Characters counted as the "special" class by the strength rule.
pub const SPECIAL_CHARS: &str = "@$!%*?&";

/// Password strength gate applied at registration.
///
/// All of: at least 6 characters, at least one ASCII digit, at least one
/// uppercase letter, at least one character from [`SPECIAL_CHARS`]. Note the
/// client-facing message also names a lowercase letter; the rule itself does
/// not check for one. Failures collapse into a single `WeakPassword` error
/// with no per-rule detail.
pub fn validate_strength(password: &str) -> Result<(), AuthError> {
    let long_enough = password.chars().count() >= 6;
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
    if long_enough && has_digit && has_upper && has_special {
        Ok(())
    } else {
        Err(AuthError::WeakPassword)
    }
}

/// Hash a password with argon2 and a fresh OS-random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}
