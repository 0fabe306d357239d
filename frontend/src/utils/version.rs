use super::storage::{KeyValueStore, APP_VERSION_KEY, PRESERVED_KEYS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    Current,
    /// Stored version was missing or different: stale keys were dropped and
    /// the new version stored.
    Upgraded { removed: Vec<String> },
}

/// Anything other than an exact version match purges every key outside
/// [`PRESERVED_KEYS`], so leftovers from builds that predate the version key
/// are cleared too.
pub fn enforce_app_version(store: &dyn KeyValueStore, version: &str) -> VersionCheck {
    if store.get(APP_VERSION_KEY).as_deref() == Some(version) {
        return VersionCheck::Current;
    }
    let removed: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|key| !PRESERVED_KEYS.contains(&key.as_str()))
        .collect();
    for key in &removed {
        store.remove(key);
    }
    if let Err(err) = store.set(APP_VERSION_KEY, version) {
        log::warn!("could not record app version: {}", err);
    }
    VersionCheck::Upgraded { removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::{MemoryStore, AUTH_TOKEN_KEY, USER_DATA_KEY};

    #[test]
    fn missing_version_purges_stale_keys() {
        let store = MemoryStore::default();
        store.set(AUTH_TOKEN_KEY, "tok").unwrap();
        store.set("install-prompt-dismissed", "true").unwrap();
        store.set("legacy-cache", "[]").unwrap();

        assert_eq!(
            enforce_app_version(&store, "1.2.0"),
            VersionCheck::Upgraded {
                removed: vec!["install-prompt-dismissed".into(), "legacy-cache".into()]
            }
        );
        assert!(store.get("legacy-cache").is_none());
        assert!(store.get("install-prompt-dismissed").is_none());
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("tok"));
        assert_eq!(store.get(APP_VERSION_KEY).as_deref(), Some("1.2.0"));
    }

    #[test]
    fn version_bump_keeps_identity_only() {
        let store = MemoryStore::default();
        store.set(APP_VERSION_KEY, "1.1.0").unwrap();
        store.set(AUTH_TOKEN_KEY, "tok").unwrap();
        store.set(USER_DATA_KEY, "{}").unwrap();
        store.set("install-prompt-dismissed", "true").unwrap();

        let outcome = enforce_app_version(&store, "1.2.0");
        assert_eq!(
            outcome,
            VersionCheck::Upgraded {
                removed: vec!["app_version".into(), "install-prompt-dismissed".into()]
            }
        );
        assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("tok"));
        assert_eq!(store.get(USER_DATA_KEY).as_deref(), Some("{}"));
        assert!(store.get("install-prompt-dismissed").is_none());
        assert_eq!(store.get(APP_VERSION_KEY).as_deref(), Some("1.2.0"));
    }

    #[test]
    fn same_version_is_untouched() {
        let store = MemoryStore::default();
        store.set(APP_VERSION_KEY, "1.2.0").unwrap();
        store.set("other", "x").unwrap();
        assert_eq!(enforce_app_version(&store, "1.2.0"), VersionCheck::Current);
        assert!(store.get("other").is_some());
    }
}
