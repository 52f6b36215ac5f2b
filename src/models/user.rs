use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Store-generated user identifier.
pub type UserId = i64;

/// A registered account. Users are created on registration and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Lowercase hex SHA-256 digest of the password. Never serialized.
    #[serde(skip_serializing, default)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
}
