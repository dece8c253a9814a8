//! # Session lifecycle over a key-value storage backend
//!
//! [`SessionContext`] owns the signed-in user's token and profile. It is the
//! only writer of the session keys, and every view reads the session through
//! it rather than looking keys up itself.
//!
//! ## [`SessionStorage`] trait
//!
//! A synchronous string key-value interface (`get`/`set`/`remove`). The
//! browser's `localStorage` ([`crate::LocalStorage`], `web` feature) is the
//! production backend; [`crate::MemoryStorage`] backs tests and native builds.
//!
//! ## Keys
//!
//! | Key | Field |
//! |-----|-------|
//! | `token` | bearer token issued at login/sign-up |
//! | `userId` | backend user id |
//! | `userName` | username |
//! | `emailId` | email address |
//! | `company` | company name (may be absent) |
//!
//! A session exists exactly when `token` is present. The token is never
//! parsed or checked for expiry here; the backend rejects stale tokens.

use serde::{Deserialize, Serialize};

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const USER_NAME_KEY: &str = "userName";
pub const EMAIL_KEY: &str = "emailId";
pub const COMPANY_KEY: &str = "company";

/// Every key the session writes, cleared together on logout.
pub const SESSION_KEYS: [&str; 5] = [TOKEN_KEY, USER_ID_KEY, USER_NAME_KEY, EMAIL_KEY, COMPANY_KEY];

/// String key-value storage that outlives a page load.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Profile fields kept alongside the token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub company: Option<String>,
}

impl UserProfile {
    /// Single uppercase letter for the avatar.
    pub fn initial(&self) -> char {
        self.user_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

/// An authenticated session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Session lifecycle: `login`, `logout`, `current_session`.
#[derive(Clone, Debug)]
pub struct SessionContext<S: SessionStorage> {
    storage: S,
    current: Option<Session>,
}

impl<S: SessionStorage> SessionContext<S> {
    /// Open the context, restoring whatever session the storage holds.
    pub fn open(storage: S) -> Self {
        let current = restore(&storage);
        Self { storage, current }
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    /// Persist `session` and make it current.
    pub fn login(&mut self, session: Session) {
        self.storage.set(TOKEN_KEY, &session.token);
        self.storage.set(USER_ID_KEY, &session.user.id);
        self.storage.set(USER_NAME_KEY, &session.user.user_name);
        self.storage.set(EMAIL_KEY, &session.user.email);
        match &session.user.company {
            Some(company) => self.storage.set(COMPANY_KEY, company),
            None => self.storage.remove(COMPANY_KEY),
        }
        self.current = Some(session);
    }

    /// Remove every session key and forget the current session.
    pub fn logout(&mut self) {
        for key in SESSION_KEYS {
            self.storage.remove(key);
        }
        self.current = None;
    }
}

fn restore<S: SessionStorage>(storage: &S) -> Option<Session> {
    let token = storage.get(TOKEN_KEY)?;
    Some(Session {
        token,
        user: UserProfile {
            id: storage.get(USER_ID_KEY).unwrap_or_default(),
            user_name: storage.get(USER_NAME_KEY).unwrap_or_default(),
            email: storage.get(EMAIL_KEY).unwrap_or_default(),
            company: storage.get(COMPANY_KEY),
        },
    })
}
