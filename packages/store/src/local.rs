//! # localStorage session backend — browser-side persistence
//!
//! [`LocalStorage`] is the [`SessionStorage`] implementation used on the
//! **web platform**. It writes the session keys into `window.localStorage`
//! through [`web_sys::Storage`], so a reload keeps the user signed in.
//!
//! ## Connection management
//!
//! `LocalStorage` is a zero-size struct (`Clone`-friendly) that looks up the
//! `Storage` handle on every operation. `web_sys::Storage` is not `Send`, and
//! the lookup is a cheap property read on `window`.
//!
//! ## Error handling
//!
//! All trait methods swallow errors (returning `None` for reads, doing
//! nothing for writes). Storage can be unavailable in private browsing; the
//! console then behaves as if nobody is signed in.

use crate::session::SessionStorage;

/// `window.localStorage`-backed SessionStorage for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        let _ = storage.set_item(key, value);
    }

    fn remove(&self, key: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        let _ = storage.remove_item(key);
    }
}
