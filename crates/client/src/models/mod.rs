//! Domain models persisted in the blob store.
//!
//! Field names follow the stored JSON (camelCase), so values written by the
//! web front end and by this crate are interchangeable.

pub mod address;
pub mod session;
pub mod user;

pub use address::{AddressPatch, SavedAddress};
pub use user::{CredentialRecord, User};
