//! Session record repository (`geoaddress_user`).

use super::{RepositoryError, read_json, write_json};
use crate::models::session::keys;
use crate::models::user::User;
use crate::storage::KeyValueStore;

/// Repository for the current session user.
pub struct SessionRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> SessionRepository<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The persisted session user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the record is corrupt.
    pub fn get(&self) -> Result<Option<User>, RepositoryError> {
        read_json(self.store, keys::CURRENT_USER)
    }

    /// Persist `user` as the session user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub fn set(&self, user: &User) -> Result<(), RepositoryError> {
        write_json(self.store, keys::CURRENT_USER, user)
    }

    /// Remove the session record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(keys::CURRENT_USER)?;
        Ok(())
    }
}
