//! Client-side key-value storage for the current session.
//!
//! A flat JSON object on disk. Two keys matter: `sessionId`, the opaque id
//! of the last session the service created, and `sessionType`, present and
//! set to `creator` only for creator sessions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::types::SessionKind;
use crate::StoreError;

pub const SESSION_ID_KEY: &str = "sessionId";
pub const SESSION_TYPE_KEY: &str = "sessionType";

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl SessionStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file exists but cannot be read and
    /// [`StoreError::Parse`] if it is not a JSON object of strings.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| StoreError::Parse {
                path: path.display().to_string(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// A store at `path` with no entries, ignoring whatever the file holds.
    /// Nothing is written until [`SessionStore::save`].
    #[must_use]
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Write the store back to disk, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the directory or file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let body = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        std::fs::write(&self.path, body).map_err(write_err)
    }

    /// The stored session id, if any. Blank values count as absent.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.get(SESSION_ID_KEY).filter(|id| !id.trim().is_empty())
    }

    #[must_use]
    pub fn session_kind(&self) -> SessionKind {
        match self.get(SESSION_TYPE_KEY) {
            Some("creator") => SessionKind::Creator,
            _ => SessionKind::Single,
        }
    }

    /// Remember a freshly created session and persist the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the store cannot be saved.
    pub fn record_session(&mut self, session_id: &str, kind: SessionKind) -> Result<(), StoreError> {
        self.set(SESSION_ID_KEY, session_id);
        match kind {
            SessionKind::Creator => self.set(SESSION_TYPE_KEY, "creator"),
            SessionKind::Single => self.remove(SESSION_TYPE_KEY),
        }
        self.save()
    }

    /// Forget the current session and persist the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the store cannot be saved.
    pub fn clear_session(&mut self) -> Result<(), StoreError> {
        self.remove(SESSION_ID_KEY);
        self.remove(SESSION_TYPE_KEY);
        self.save()
    }
}
