use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CredentialKey, CredentialStore};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// On-disk shape of the session file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionData {
    fn slot(&mut self, key: CredentialKey) -> &mut Option<String> {
        match key {
            CredentialKey::AccessToken => &mut self.access_token,
            CredentialKey::RefreshToken => &mut self.refresh_token,
        }
    }

    fn value(&self, key: CredentialKey) -> Option<&String> {
        match key {
            CredentialKey::AccessToken => self.access_token.as_ref(),
            CredentialKey::RefreshToken => self.refresh_token.as_ref(),
        }
    }

    fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Credential store persisted as `session.json` in the cache directory.
///
/// The file is removed once the last credential is erased.
pub struct FileStore {
    cache_dir: PathBuf,
    // Serializes read-modify-write of the file
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            lock: Mutex::new(()),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }

    fn load(&self) -> Result<SessionData> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(SessionData::default());
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        serde_json::from_str(&contents).context("Failed to parse session file")
    }

    fn save(&self, data: &SessionData) -> Result<()> {
        let path = self.session_path();
        if data.is_empty() {
            if path.exists() {
                std::fs::remove_file(&path).context("Failed to remove session file")?;
            }
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(&path, contents).context("Failed to write session file")?;
        Ok(())
    }

    fn update(&self, key: CredentialKey, value: Option<&str>) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("session file lock poisoned"))?;
        let mut data = self.load()?;
        *data.slot(key) = value.map(str::to_string);
        data.updated_at = Some(Utc::now());
        self.save(&data)
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("session file lock poisoned"))?;
        Ok(self.load()?.value(key).cloned())
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        self.update(key, Some(value))
    }

    fn erase(&self, key: CredentialKey) -> Result<()> {
        self.update(key, None)
    }
}
