use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::UserInfo;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;

const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 30;

struct Session {
    user: UserInfo,
    expires_at: DateTime<Utc>,
}

/// Refresh tokens issued by this backend
///
/// Tokens are kept only as SHA-256 hashes. The store lives in memory, so a
/// restart signs everybody out of the refresh flow.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, token: &str, user: UserInfo) {
        self.store_until(token, user, Utc::now() + Duration::days(REFRESH_TOKEN_LIFETIME_DAYS));
    }

    fn store_until(&self, token: &str, user: UserInfo, expires_at: DateTime<Utc>) {
        let mut sessions = self.lock();
        let now = Utc::now();
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(hash_token(token), Session { user, expires_at });
    }

    /// User of a valid, unexpired refresh token
    pub fn validate(&self, token: &str) -> Option<UserInfo> {
        let sessions = self.lock();
        sessions
            .get(&hash_token(token))
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.user.clone())
    }

    /// Returns whether the token was known
    pub fn revoke(&self, token: &str) -> bool {
        self.lock().remove(&hash_token(token)).is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        // a poisoned map is still consistent: every operation is a single insert/remove
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> UserInfo {
        UserInfo {
            username: name.into(),
            full_name: None,
            team: None,
            profile_picture_url: None,
            is_admin: false,
            pages: vec![],
        }
    }

    #[test]
    fn test_store_validate_revoke() {
        let store = SessionStore::new();
        store.store("token-1", user("linh"));

        assert_eq!(store.validate("token-1").map(|u| u.username), Some("linh".to_string()));
        assert!(store.validate("token-2").is_none());

        assert!(store.revoke("token-1"));
        assert!(!store.revoke("token-1"));
        assert!(store.validate("token-1").is_none());
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let store = SessionStore::new();
        store.store_until("old", user("minh"), Utc::now() - Duration::seconds(1));
        assert!(store.validate("old").is_none());
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        assert_eq!(hash_token("abc").len(), 64);
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }
}
