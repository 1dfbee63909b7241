use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input. Absent fields deserialize as empty strings so the
/// service-level checks decide the outcome, not the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Login input; `identifier` is matched against email first, then username
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub identifier: String,
    pub password: String,
}

/// Password-reset input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetPasswordInput {
    pub identifier: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Token-rotation input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshInput {
    pub refresh: String,
}

/// Domain user (business view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Issued credential pair; both are opaque signed strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
