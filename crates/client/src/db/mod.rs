//! Repositories over the blob store.
//!
//! # Keys
//!
//! - `geoaddress_user` - [`session::SessionRepository`]
//! - `geoaddress_users` - [`users::UserRepository`]
//! - `geoaddress_addresses_{userId}` - [`addresses::AddressRepository`]
//!
//! Each operation reads the whole JSON value under its key, modifies it in
//! memory and writes it back. Nothing is transactional across operations.

pub mod addresses;
pub mod session;
pub mod users;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};

pub use addresses::AddressRepository;
pub use session::SessionRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A stored value does not decode.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A value could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Read and decode the JSON value under `key`.
fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>, RepositoryError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid JSON under {key}: {e}")))
}

/// Encode `value` as JSON and store it under `key`.
fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), RepositoryError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)?;
    Ok(())
}
