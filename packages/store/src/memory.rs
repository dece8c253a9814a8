use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::session::SessionStorage;

/// In-memory SessionStorage for testing and native builds.
///
/// Clones share the same map, so a second [`crate::SessionContext`] opened on
/// a clone sees what the first one wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionContext, UserProfile, SESSION_KEYS, TOKEN_KEY};

    fn session() -> Session {
        Session {
            token: "jwt-abc".to_string(),
            user: UserProfile {
                id: "12".to_string(),
                user_name: "operator".to_string(),
                email: "ops@example.com".to_string(),
                company: Some("Acme".to_string()),
            },
        }
    }

    #[test]
    fn test_login_persists_across_reopen() {
        let storage = MemoryStorage::new();
        let mut ctx = SessionContext::open(storage.clone());

        // Initially signed out
        assert!(!ctx.is_authenticated());
        assert!(ctx.current_session().is_none());

        ctx.login(session());
        assert_eq!(ctx.token(), Some("jwt-abc"));

        // A fresh context over the same storage restores the session
        let reopened = SessionContext::open(storage);
        assert_eq!(reopened.current_session(), Some(&session()));
    }

    #[test]
    fn test_logout_clears_every_key() {
        let storage = MemoryStorage::new();
        let mut ctx = SessionContext::open(storage.clone());
        ctx.login(session());
        assert_eq!(storage.len(), SESSION_KEYS.len());

        ctx.logout();
        assert!(!ctx.is_authenticated());
        assert!(storage.is_empty());
        assert!(!SessionContext::open(storage).is_authenticated());
    }

    #[test]
    fn test_missing_token_means_signed_out() {
        let storage = MemoryStorage::new();
        storage.set("userName", "leftover");
        storage.set("emailId", "leftover@example.com");

        assert!(SessionContext::open(storage.clone()).current_session().is_none());

        // A bare token is enough; profile fields are not validated
        storage.set(TOKEN_KEY, "t");
        let ctx = SessionContext::open(storage);
        let restored = ctx.current_session().unwrap();
        assert_eq!(restored.user.user_name, "leftover");
        assert_eq!(restored.user.id, "");
        assert!(restored.user.company.is_none());
    }

    #[test]
    fn test_login_without_company_drops_stale_value() {
        let storage = MemoryStorage::new();
        let mut ctx = SessionContext::open(storage.clone());
        ctx.login(session());

        let mut other = session();
        other.user.company = None;
        ctx.login(other);

        assert!(storage.get("company").is_none());
        assert_eq!(ctx.current_session().unwrap().user.initial(), 'O');
    }
}
