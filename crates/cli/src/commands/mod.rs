//! Subcommand implementations.
//!
//! Results are reported through `tracing::info!`, so `RUST_LOG` controls how
//! much a command prints.

pub mod addresses;
pub mod auth;
pub mod import;

use std::path::PathBuf;

use thiserror::Error;

use geoaddress_client::config::ConfigError;
use geoaddress_client::{AddressError, ClientConfig, ClientState, FileStore, StorageError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Address(#[from] AddressError),

    /// Sign-in or sign-up was refused.
    #[error("{0} failed")]
    AuthFailed(&'static str),

    #[error("No saved address with id {0}")]
    AddressNotFound(String),

    #[error("Nothing to change: pass --label, --note or --code")]
    EmptyEdit,
}

/// Load configuration and open the file store.
///
/// # Errors
///
/// Returns `CommandError` if the environment is invalid or the data directory
/// cannot be created.
pub fn open_state(data_dir: Option<PathBuf>) -> Result<ClientState<FileStore>, CommandError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "Opening store");
    Ok(ClientState::open(config)?)
}
