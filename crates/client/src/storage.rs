//! Durable key/value state store.
//!
//! The platform keeps its local state as string key/value pairs under the
//! `aos_` namespace: the bearer token, the identity blob, the forced
//! password-change flag and the UI language. Everything lives in one JSON
//! object file inside the state directory; mutations rewrite the file
//! through a temp-file-then-rename so a batch applied with [`Storage::set_many`]
//! lands as a single record.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// File name of the state blob inside the state directory.
const STATE_FILE: &str = "state.json";

/// Well-known storage keys.
pub mod keys {
    /// Raw bearer token string.
    pub const TOKEN: &str = "aos_token";
    /// Identity record as a JSON blob.
    pub const USER: &str = "aos_user";
    /// Forced password-change flag ("true"/"false").
    pub const MUST_CHANGE_PASSWORD: &str = "aos_must_change_password";
    /// UI language preference ("fr"/"ar").
    pub const LANGUAGE: &str = "aos_language";
}

/// Errors that can occur reading or writing the state file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State could not be serialized.
    #[error("state serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed string key/value store.
///
/// Writes are synchronous; there is no cross-process locking. A corrupt or
/// unreadable state file is treated as empty, which downstream reads as
/// "logged out".
pub struct Storage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl Storage {
    /// Open (or create) the store in the given directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(STATE_FILE);

        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "discarding corrupt state file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Read a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Write one value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the state file cannot be rewritten.
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        self.set_many(vec![(key.to_owned(), value.into())])
    }

    /// Write several values in one file write.
    ///
    /// Callers persisting related keys (token + identity + flag at login)
    /// use this so a crash cannot leave a partial pair behind.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the state file cannot be rewritten.
    pub fn set_many(&self, pairs: Vec<(String, String)>) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (key, value) in pairs {
            entries.insert(key, value);
        }
        self.persist(&entries)
    }

    /// Remove one key. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the state file cannot be rewritten.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_many(&[key])
    }

    /// Remove several keys in one file write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the state file cannot be rewritten.
    pub fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            entries.remove(*key);
        }
        self.persist(&entries)
    }

    /// Rewrite the state file from the given map.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        assert!(storage.get(keys::TOKEN).is_none());
        storage.set(keys::TOKEN, "abc.def.ghi").unwrap();
        assert_eq!(storage.get(keys::TOKEN).as_deref(), Some("abc.def.ghi"));

        storage.remove(keys::TOKEN).unwrap();
        assert!(storage.get(keys::TOKEN).is_none());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = Storage::open(dir.path()).unwrap();
            storage
                .set_many(vec![
                    (keys::TOKEN.to_owned(), "t".to_owned()),
                    (keys::LANGUAGE.to_owned(), "ar".to_owned()),
                ])
                .unwrap();
        }
        let reopened = Storage::open(dir.path()).unwrap();
        assert_eq!(reopened.get(keys::TOKEN).as_deref(), Some("t"));
        assert_eq!(reopened.get(keys::LANGUAGE).as_deref(), Some("ar"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STATE_FILE), b"{not json").unwrap();

        let storage = Storage::open(dir.path()).unwrap();
        assert!(storage.get(keys::TOKEN).is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.remove("aos_never_written").unwrap();
    }

    #[test]
    fn test_set_many_is_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage
            .set_many(vec![
                (keys::TOKEN.to_owned(), "t".to_owned()),
                (keys::USER.to_owned(), "{}".to_owned()),
                (keys::MUST_CHANGE_PASSWORD.to_owned(), "false".to_owned()),
            ])
            .unwrap();

        let raw = fs::read_to_string(dir.path().join(STATE_FILE)).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map.len(), 3);
    }
}
