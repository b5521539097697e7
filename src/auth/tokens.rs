//! Session token store
//!
//! Issues opaque bearer tokens (UUID v4) and validates them against an
//! in-memory session table with a fixed lifetime. Sessions do not survive a
//! process restart; clients simply log in again.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::users::{Role, UserAccount};

/// One live session behind a bearer token
#[derive(Debug, Clone)]
pub struct Session {
    /// Username the token was issued to
    pub username: String,
    /// Display name carried for response payloads
    pub display_name: String,
    /// Role captured at login time
    pub role: Role,
    /// Instant the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// In-memory session table keyed by token
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    /// Create a session store with the given token lifetime in hours
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            ttl: Duration::hours(ttl_hours),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh token for an authenticated account
    pub fn issue(&self, account: &UserAccount) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
            expires_at: Utc::now() + self.ttl,
        };

        let mut sessions = self.lock();
        sessions.insert(token.clone(), session);
        token
    }

    /// Look up a token, returning its session if still valid
    ///
    /// Expired sessions are dropped from the table on lookup.
    pub fn validate(&self, token: &str) -> Option<Session> {
        let mut sessions = self.lock();
        let session = sessions.get(token)?;

        if session.expires_at <= Utc::now() {
            sessions.remove(token);
            return None;
        }

        Some(session.clone())
    }

    /// Number of live sessions (expired ones may still be counted until
    /// their next lookup)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no sessions exist
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::UserStore;

    fn demo_account() -> UserAccount {
        let store = UserStore::with_demo_users().unwrap();
        store.authenticate("admin", "admin123").unwrap().clone()
    }

    #[test]
    fn test_issue_and_validate() {
        let store = SessionStore::new(8);
        let account = demo_account();

        let token = store.issue(&account);
        let session = store.validate(&token).unwrap();

        assert_eq!(session.username, "admin");
        assert_eq!(session.role, Role::Admin);
    }

    #[test]
    fn test_unknown_token_rejected() {
        let store = SessionStore::new(8);
        assert!(store.validate("not-a-token").is_none());
    }

    #[test]
    fn test_expired_token_rejected_and_dropped() {
        // Zero-hour lifetime expires the session immediately
        let store = SessionStore::new(0);
        let token = store.issue(&demo_account());

        assert!(store.validate(&token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new(8);
        let account = demo_account();

        let a = store.issue(&account);
        let b = store.issue(&account);

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }
}
