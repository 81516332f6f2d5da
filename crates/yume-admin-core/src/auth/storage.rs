use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::config::{Config, CredentialBackend};

use super::{FileStore, KeyringStore};

/// Names of the credential entries held for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
}

impl CredentialKey {
    /// Every key a session may hold; teardown erases all of them.
    pub const ALL: [CredentialKey; 2] = [CredentialKey::AccessToken, CredentialKey::RefreshToken];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::AccessToken => "access_token",
            CredentialKey::RefreshToken => "refresh_token",
        }
    }
}

impl std::fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value capability holding session credentials.
///
/// Implementations must be safe to share between tasks. Values are secrets:
/// never log them or put them in error messages.
pub trait CredentialStore: Send + Sync {
    /// Read a credential; `Ok(None)` when it was never set or has been erased.
    fn get(&self, key: CredentialKey) -> Result<Option<String>>;

    fn set(&self, key: CredentialKey, value: &str) -> Result<()>;

    /// Remove a credential. Erasing a missing key is not an error.
    fn erase(&self, key: CredentialKey) -> Result<()>;
}

/// In-process credential store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<CredentialKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with tokens, mostly useful in tests.
    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            if let Some(access) = access {
                entries.insert(CredentialKey::AccessToken, access.to_string());
            }
            if let Some(refresh) = refresh {
                entries.insert(CredentialKey::RefreshToken, refresh.to_string());
            }
        }
        store
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<CredentialKey, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("credential store lock poisoned"))
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        Ok(self.entries()?.get(&key).cloned())
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        self.entries()?.insert(key, value.to_string());
        Ok(())
    }

    fn erase(&self, key: CredentialKey) -> Result<()> {
        self.entries()?.remove(&key);
        Ok(())
    }
}

/// Open the credential store selected in the configuration.
pub fn open_store(config: &Config) -> Result<Arc<dyn CredentialStore>> {
    let store: Arc<dyn CredentialStore> = match config.credential_backend {
        CredentialBackend::File => Arc::new(FileStore::new(config.cache_dir()?)),
        CredentialBackend::Keyring => Arc::new(KeyringStore::new()),
        CredentialBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set_erase() {
        let store = MemoryStore::new();
        assert_eq!(store.get(CredentialKey::AccessToken).unwrap(), None);

        store.set(CredentialKey::AccessToken, "abc").unwrap();
        assert_eq!(store.get(CredentialKey::AccessToken).unwrap().as_deref(), Some("abc"));
        assert_eq!(store.get(CredentialKey::RefreshToken).unwrap(), None);

        store.erase(CredentialKey::AccessToken).unwrap();
        assert_eq!(store.get(CredentialKey::AccessToken).unwrap(), None);

        // Erasing twice is fine
        store.erase(CredentialKey::AccessToken).unwrap();
    }

    #[test]
    fn test_memory_store_with_tokens() {
        let store = MemoryStore::with_tokens(Some("a"), None);
        assert_eq!(store.get(CredentialKey::AccessToken).unwrap().as_deref(), Some("a"));
        assert_eq!(store.get(CredentialKey::RefreshToken).unwrap(), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(CredentialKey::AccessToken.to_string(), "access_token");
        assert_eq!(CredentialKey::RefreshToken.as_str(), "refresh_token");
    }
}
