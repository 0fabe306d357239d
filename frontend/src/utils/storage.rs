use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::api::User;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_DATA_KEY: &str = "user_data";
pub const APP_VERSION_KEY: &str = "app_version";
pub const INSTALL_PROMPT_DISMISSED_KEY: &str = "install-prompt-dismissed";

/// Keys that survive an app version bump.
pub const PRESERVED_KEYS: &[&str] = &[AUTH_TOKEN_KEY, USER_DATA_KEY];

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
    fn keys(&self) -> Vec<String>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{local_storage, window, LocalStorageStore};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::KeyValueStore;
    use web_sys::{Storage, Window};

    pub fn window() -> Result<Window, String> {
        web_sys::window().ok_or_else(|| "No window object".to_string())
    }

    pub fn local_storage() -> Result<Storage, String> {
        window()?
            .local_storage()
            .map_err(|_| "No localStorage".to_string())?
            .ok_or_else(|| "No localStorage".to_string())
    }

    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStorageStore;

    impl KeyValueStore for LocalStorageStore {
        fn get(&self, key: &str) -> Option<String> {
            local_storage().ok()?.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), String> {
            local_storage()?
                .set_item(key, value)
                .map_err(|_| format!("Failed to write {}", key))
        }

        fn remove(&self, key: &str) {
            if let Ok(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }

        fn keys(&self) -> Vec<String> {
            let Ok(storage) = local_storage() else {
                return Vec::new();
            };
            let len = storage.length().unwrap_or(0);
            (0..len)
                .filter_map(|index| storage.key(index).ok().flatten())
                .collect()
        }
    }
}

/// Typed access to the persisted identity.
#[derive(Clone)]
pub struct SessionStore {
    store: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::default()))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(Rc::new(LocalStorageStore))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn browser() -> Self {
        Self::in_memory()
    }

    pub fn raw(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn token(&self) -> Option<String> {
        self.store
            .get(AUTH_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn cached_user(&self) -> Option<User> {
        let raw = self.store.get(USER_DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("discarding unreadable cached profile: {}", err);
                self.store.remove(USER_DATA_KEY);
                None
            }
        }
    }

    pub fn save_token(&self, token: &str) -> Result<(), String> {
        self.store.set(AUTH_TOKEN_KEY, token)
    }

    pub fn save_user(&self, user: &User) -> Result<(), String> {
        let raw = serde_json::to_string(user).map_err(|e| e.to_string())?;
        self.store.set(USER_DATA_KEY, &raw)
    }

    pub fn persist(&self, token: &str, user: &User) -> Result<(), String> {
        self.save_token(token)?;
        self.save_user(user)
    }

    pub fn clear_identity(&self) {
        self.store.remove(AUTH_TOKEN_KEY);
        self.store.remove(USER_DATA_KEY);
    }

    pub fn flag(&self, key: &str) -> bool {
        self.store.get(key).as_deref() == Some("true")
    }

    pub fn set_flag(&self, key: &str) -> Result<(), String> {
        self.store.set(key, "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;

    fn sample_user() -> User {
        User {
            id: "u1".into(),
            name: "Lucía".into(),
            identification: "1001".into(),
            email: None,
            role: Role::User,
            flowers: 3,
            avatar: None,
            group: None,
        }
    }

    #[test]
    fn persist_and_clear_identity() {
        let session = SessionStore::in_memory();
        assert!(session.token().is_none());

        session.persist("tok-1", &sample_user()).unwrap();
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert_eq!(session.cached_user().map(|u| u.flowers), Some(3));

        session.clear_identity();
        assert!(session.token().is_none());
        assert!(session.cached_user().is_none());
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let session = SessionStore::in_memory();
        session.save_token("  ").unwrap();
        assert!(session.token().is_none());
    }

    #[test]
    fn corrupt_profile_is_dropped() {
        let session = SessionStore::in_memory();
        session.raw().set(USER_DATA_KEY, "{not json").unwrap();
        assert!(session.cached_user().is_none());
        assert!(session.raw().get(USER_DATA_KEY).is_none());
    }

    #[test]
    fn flags_round_trip() {
        let session = SessionStore::in_memory();
        assert!(!session.flag(INSTALL_PROMPT_DISMISSED_KEY));
        session.set_flag(INSTALL_PROMPT_DISMISSED_KEY).unwrap();
        assert!(session.flag(INSTALL_PROMPT_DISMISSED_KEY));
    }
}
