//! Client state shared by the front end.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::services::address_book::{AddressBook, AddressError};
use crate::services::session::Session;
use crate::storage::{FileStore, KeyValueStore, StorageError};

/// Configuration plus the blob store it points at.
///
/// Cheaply cloneable via `Arc`. Sessions and address books borrow the store
/// from here.
pub struct ClientState<S> {
    inner: Arc<ClientStateInner<S>>,
}

struct ClientStateInner<S> {
    config: ClientConfig,
    store: S,
}

impl<S> Clone for ClientState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ClientState<FileStore> {
    /// Open the file-backed store in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Open` if the data directory cannot be created.
    pub fn open(config: ClientConfig) -> Result<Self, StorageError> {
        let store = FileStore::open(config.data_dir.clone())?;
        Ok(Self::with_store(config, store))
    }
}

impl<S: KeyValueStore> ClientState<S> {
    /// Wrap an already constructed store.
    #[must_use]
    pub fn with_store(config: ClientConfig, store: S) -> Self {
        Self {
            inner: Arc::new(ClientStateInner { config, store }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Restore the session persisted in the store.
    #[must_use]
    pub fn session(&self) -> Session<'_, S> {
        Session::restore(self.store(), self.config().auth_latency)
    }

    /// Open the address book of the session's user.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotSignedIn` if `session` has no user, or a
    /// repository error if the collection cannot be read.
    pub fn address_book<'s>(
        &'s self,
        session: &Session<'_, S>,
    ) -> Result<AddressBook<'s, S>, AddressError> {
        AddressBook::open(self.store(), session, self.config())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_clones_share_store() {
        let state = ClientState::with_store(
            ClientConfig::default().without_latency(),
            MemoryStore::new(),
        );
        let other = state.clone();

        let mut session = state.session();
        assert!(session.signup("a@b.com", "pw", "Ada").await);
        assert!(other.session().is_signed_in());
    }

    #[test]
    fn test_open_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            data_dir: dir.path().join("nested"),
            ..ClientConfig::default()
        };
        let state = ClientState::open(config).unwrap();
        assert!(state.store().dir().is_dir());
    }
}
