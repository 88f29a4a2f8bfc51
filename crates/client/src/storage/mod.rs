//! Durable string-keyed blob storage.
//!
//! The store plays the role browser storage plays for the web front end:
//! every value is a JSON document stored under a short key, and every
//! repository operation reads the whole value, modifies it and writes it
//! back. There is no locking across processes; the last writer wins.
//!
//! # Keys
//!
//! - `geoaddress_user` - Current session user
//! - `geoaddress_users` - Credential records
//! - `geoaddress_addresses_{userId}` - Saved addresses for one user
//!
//! Keys are restricted to ASCII letters, digits, `_`, `-` and `.` so that
//! every backend can map them to file names.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Maximum key length accepted by any backend.
const MAX_KEY_LENGTH: usize = 200;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on key {key}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Opening the storage directory failed.
    #[error("cannot open storage directory {path}: {source}")]
    Open {
        /// Directory path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters no backend can store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the in-memory lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed blob store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Check that a key only uses the portable character set.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` for empty, overlong, dot-only or
/// non-portable keys.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let portable = key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'));

    if key.is_empty()
        || key.len() > MAX_KEY_LENGTH
        || !portable
        || key.bytes().all(|b| b == b'.')
    {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(())
}
