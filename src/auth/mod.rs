pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::hash_password;
pub use token::Session;

/// Email and password, as sent to both `/api/auth/register` and `/api/auth/login`.
///
/// Neither field is format-checked; an unknown email simply fails to log in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The opaque session token to send back as the `Authorization` header.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        let parsed: Result<Credentials, _> =
            serde_json::from_str(r#"{"email": "test@example.com", "password": "pw"}"#);
        assert!(parsed.is_ok());

        let missing_password: Result<Credentials, _> =
            serde_json::from_str(r#"{"email": "test@example.com"}"#);
        assert!(missing_password.is_err());
    }
}
