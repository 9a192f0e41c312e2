//! Persistence of view preferences across sessions.
//!
//! Only [`ViewPreferences`] crosses this boundary. The canonical graph,
//! search state, selection and filters are never written, so a reload can
//! not show a stale architecture.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use archview_error::{Error, Result};

use crate::store::ViewPreferences;

/// Version written alongside the payload. Payloads with another version are
/// ignored on load.
pub const PAYLOAD_VERSION: u32 = 1;

/// A simple key/value byte store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process storage, mostly for tests and ephemeral hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::storage_failed("persist::file_get", key, err)),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(self.path_for(key), value))
            .map_err(|err| Error::storage_failed("persist::file_set", key, err))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::storage_failed("persist::file_remove", key, err)),
        }
    }
}

#[derive(Serialize)]
struct PayloadRef<'a> {
    state: &'a ViewPreferences,
    version: u32,
}

#[derive(Deserialize)]
struct Payload {
    state: ViewPreferences,
    version: u32,
}

/// Saves and restores [`ViewPreferences`] under a fixed key.
pub struct PersistenceAdapter {
    storage: Box<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(storage: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored preferences.
    ///
    /// Returns `Ok(None)` when nothing is stored or the payload version does
    /// not match. A payload that cannot be parsed is an error.
    pub fn load(&self) -> Result<Option<ViewPreferences>> {
        let Some(bytes) = self
            .storage
            .get(&self.key)
            .map_err(|err| err.with_operation("persist::load"))?
        else {
            debug!(key = %self.key, "no persisted preferences");
            return Ok(None);
        };

        let payload: Payload = serde_json::from_slice(&bytes).map_err(|err| {
            Error::deserialization_failed(format!("corrupt preference payload: {err}"))
                .with_operation("persist::load")
                .with_context("key", self.key.clone())
                .set_source(err)
        })?;

        if payload.version != PAYLOAD_VERSION {
            warn!(
                key = %self.key,
                found = payload.version,
                expected = PAYLOAD_VERSION,
                "ignoring persisted preferences with unknown version"
            );
            return Ok(None);
        }
        Ok(Some(payload.state))
    }

    /// Write `prefs` under the adapter's key.
    ///
    /// A viewport with a NaN or infinite component is refused and the stored
    /// payload is left as it was, since JSON can not carry those values back.
    pub fn save(&mut self, prefs: &ViewPreferences) -> Result<()> {
        if !prefs.viewport.is_finite() {
            return Err(Error::serialization_failed(format!(
                "viewport ({}, {}, {}) is not finite",
                prefs.viewport.x, prefs.viewport.y, prefs.viewport.scale
            ))
            .with_operation("persist::save")
            .with_context("key", self.key.clone()));
        }
        let bytes = serde_json::to_vec(&PayloadRef {
            state: prefs,
            version: PAYLOAD_VERSION,
        })
        .map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("persist::save")
                .set_source(err)
        })?;
        self.storage
            .set(&self.key, &bytes)
            .map_err(|err| err.with_operation("persist::save"))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.storage
            .remove(&self.key)
            .map_err(|err| err.with_operation("persist::clear"))
    }
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
