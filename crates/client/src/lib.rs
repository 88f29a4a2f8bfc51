//! GeoAddress client library.
//!
//! Everything the GeoAddress front end does apart from drawing widgets:
//! persisting users, sessions and saved addresses to a string-keyed blob
//! store, mock authentication, the address book state and the hand-off
//! helpers for sharing and navigation.
//!
//! # Architecture
//!
//! - [`storage`] - The blob store (`get`/`set`/`remove` of JSON strings)
//! - [`db`] - Repositories that read-modify-write whole collections in the store
//! - [`services`] - Authentication, session, address book, locator and share helpers
//! - [`state`] - Configuration plus store bundled for the front end

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod search;
pub mod services;
pub mod state;
pub mod storage;

pub use config::ClientConfig;
pub use services::address_book::{AddressBook, AddressError};
pub use services::session::Session;
pub use state::ClientState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
