//! GeoAddress Core - Shared types library.
//!
//! This crate provides common types used across all GeoAddress components:
//! - `client` - Blob-store persistence, authentication and address book state
//! - `cli` - Command-line front end over the client library
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no timers. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, address codes and coordinates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
