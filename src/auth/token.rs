use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::UserId;

/// Upper bound on a session lifetime (ten years).
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// A login session: an opaque token bound to a user until `expires_at`.
///
/// Sessions are never renewed on use; the lifetime is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session with a fresh random token expiring `ttl_secs` from now.
    pub fn new(user_id: UserId, ttl_secs: u64) -> Self {
        Self::issued_at(user_id, ttl_secs, Utc::now())
    }

    pub fn issued_at(user_id: UserId, ttl_secs: u64, now: DateTime<Utc>) -> Self {
        let ttl = Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64);
        Self {
            token: generate_token(),
            user_id,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Generates an opaque session token (a random v4 UUID).
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

/// Shortened form of a token that is safe to put in logs.
pub fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    format!("{}…", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique() {
        let first = generate_token();
        let second = generate_token();
        assert_ne!(first, second);
        assert_eq!(first.len(), 36);
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session::issued_at(5, 3600, now);
        assert_eq!(session.user_id, 5);
        assert_eq!(session.expires_at, now + Duration::seconds(3600));
        assert!(!session.is_expired_at(now));
        assert!(!session.is_expired_at(now + Duration::seconds(3599)));
        assert!(session.is_expired_at(now + Duration::seconds(3600)));
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let now = Utc::now();
        let session = Session::issued_at(1, 0, now);
        assert!(session.is_expired_at(now));
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("0123456789abcdef"), "01234567…");
        assert_eq!(redact("abc"), "abc…");
    }
}
