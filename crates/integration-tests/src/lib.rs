//! Integration tests for GeoAddress.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p geoaddress-integration-tests
//! ```
//!
//! Every test gets its own temporary data directory, so the file-backed
//! store is exercised exactly as the CLI uses it and nothing leaks between
//! tests.
//!
//! # Test Categories
//!
//! - `auth_flow` - Sign up, sign in, sign out and session restore
//! - `address_book` - Saving, editing, deleting and deciphering addresses
//! - `persistence` - Stored JSON layout and reopening the store

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use tempfile::TempDir;

use geoaddress_client::{ClientConfig, ClientState, FileStore, StorageError};

/// A client over a fresh temporary data directory.
pub struct TestContext {
    pub state: ClientState<FileStore>,
    dir: TempDir,
}

impl TestContext {
    /// Create a context with simulated latency switched off.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the temporary directory cannot be set up.
    pub fn new() -> Result<Self, StorageError> {
        let dir = tempfile::tempdir().map_err(|source| StorageError::Open {
            path: std::env::temp_dir().display().to_string(),
            source,
        })?;
        let state = Self::open_state(dir.path())?;
        Ok(Self { state, dir })
    }

    /// A second client over the same directory, as another process would see it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be opened.
    pub fn reopen(&self) -> Result<ClientState<FileStore>, StorageError> {
        Self::open_state(self.dir.path())
    }

    /// Directory holding the store's files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    fn open_state(dir: &Path) -> Result<ClientState<FileStore>, StorageError> {
        let config = ClientConfig {
            data_dir: dir.to_path_buf(),
            ..ClientConfig::default()
        }
        .without_latency();
        ClientState::open(config)
    }
}
