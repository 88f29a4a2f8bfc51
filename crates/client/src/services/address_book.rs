//! Address book state for a signed-in user.
//!
//! Holds what the generator and "My Addresses" pages show: the current
//! location fix, the loaded list of saved addresses and the last decipher
//! result. Every mutation goes through [`AddressRepository`] and is followed
//! by a reload, so the in-memory list always mirrors the store.

use chrono::Utc;
use thiserror::Error;

use geoaddress_core::{AddressId, Coordinates, DEFAULT_GENERAL_ADDRESS, GeoCode, UserId};

use super::locate::{Located, Locator};
use super::session::Session;
use crate::config::ClientConfig;
use crate::db::{AddressRepository, RepositoryError};
use crate::models::address::{AddressPatch, SavedAddress, normalize_note};
use crate::search::find_by_code_substring;
use crate::storage::KeyValueStore;

/// Errors from address book operations.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Label is required")]
    MissingLabel,

    #[error("No location has been generated yet")]
    NothingLocated,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The signed-in user's addresses plus generator state.
pub struct AddressBook<'a, S: ?Sized> {
    repo: AddressRepository<'a, S>,
    user_id: UserId,
    addresses: Vec<SavedAddress>,
    current: Option<Located>,
    deciphered: Option<SavedAddress>,
    locator: Locator,
    recent_limit: usize,
}

impl<'a, S: KeyValueStore + ?Sized> AddressBook<'a, S> {
    /// Open the address book of the session's user and load their addresses.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotSignedIn` without a session user, or
    /// `AddressError::Repository` if the collection cannot be read.
    pub fn open(
        store: &'a S,
        session: &Session<'_, S>,
        config: &ClientConfig,
    ) -> Result<Self, AddressError> {
        let user = session.user().ok_or(AddressError::NotSignedIn)?;
        let mut book = Self {
            repo: AddressRepository::new(store),
            user_id: user.id.clone(),
            addresses: Vec::new(),
            current: None,
            deciphered: None,
            locator: Locator::new(config.locate_latency),
            recent_limit: config.recent_limit,
        };
        book.refresh()?;
        Ok(book)
    }

    /// Reload the list from the store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the collection cannot be read.
    pub fn refresh(&mut self) -> Result<(), AddressError> {
        self.addresses = self.repo.list(&self.user_id)?;
        Ok(())
    }

    #[must_use]
    pub fn addresses(&self) -> &[SavedAddress] {
        &self.addresses
    }

    /// The first few saved addresses, for the preview under the generator.
    #[must_use]
    pub fn recent(&self) -> &[SavedAddress] {
        let end = self.recent_limit.min(self.addresses.len());
        self.addresses.get(..end).unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, id: &AddressId) -> Option<&SavedAddress> {
        self.addresses.iter().find(|a| a.id == *id)
    }

    /// The most recent location fix, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Located> {
        self.current.as_ref()
    }

    /// Run the mock GPS and remember the fix as the current location.
    pub async fn locate(&mut self) -> &Located {
        let located = self.locator.locate().await;
        self.current.insert(located)
    }

    /// Save the current fix under `label`.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NothingLocated` before the first fix,
    /// `AddressError::MissingLabel` for a blank label, or a repository error.
    pub fn save_current(&mut self, label: &str, note: &str) -> Result<SavedAddress, AddressError> {
        let current = self.current.as_ref().ok_or(AddressError::NothingLocated)?;
        let label = required_label(label)?;
        let general_address = if current.locality.trim().is_empty() {
            DEFAULT_GENERAL_ADDRESS.to_owned()
        } else {
            current.locality.clone()
        };
        let address = self.build(
            label,
            note,
            current.code.to_string(),
            current.coordinates,
            general_address,
        );
        self.persist(address)
    }

    /// Add an address by hand.
    ///
    /// A missing or blank `code` is replaced by a freshly generated one; any
    /// other code is stored as typed.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::MissingLabel` for a blank label, or a repository
    /// error.
    pub fn add(
        &mut self,
        label: &str,
        note: &str,
        code: Option<&str>,
    ) -> Result<SavedAddress, AddressError> {
        let label = required_label(label)?;
        let code = match code.map(str::trim) {
            Some(code) if !code.is_empty() => code.to_owned(),
            _ => GeoCode::generate().to_string(),
        };
        let general_address = format!("{label}, {DEFAULT_GENERAL_ADDRESS}");
        let coordinates = Coordinates::mock_fix(&mut rand::rng());
        let address = self.build(label, note, code, coordinates, general_address);
        self.persist(address)
    }

    /// Apply `patch` to the address with `id`. Returns `false` if there is no
    /// such address.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::MissingLabel` if the patch blanks the label, or
    /// a repository error.
    pub fn edit(&mut self, id: &AddressId, patch: &AddressPatch) -> Result<bool, AddressError> {
        let mut patch = patch.clone();
        if let Some(label) = patch.label.take() {
            patch.label = Some(required_label(&label)?.to_owned());
        }
        let changed = self.repo.update(&self.user_id, id, &patch)?;
        self.refresh()?;
        if changed {
            tracing::info!(address_id = %id, "Address updated");
        }
        Ok(changed)
    }

    /// Delete the address with `id`. Returns `false` if there is no such
    /// address.
    ///
    /// # Errors
    ///
    /// Returns a repository error if the store fails.
    pub fn delete(&mut self, id: &AddressId) -> Result<bool, AddressError> {
        let removed = self.repo.delete(&self.user_id, id)?;
        self.refresh()?;
        if self.deciphered.as_ref().is_some_and(|a| a.id == *id) {
            self.deciphered = None;
        }
        if removed {
            tracing::info!(address_id = %id, "Address deleted");
        }
        Ok(removed)
    }

    /// Look up a saved address by part of its code and remember the result.
    pub fn decipher(&mut self, query: &str) -> Option<&SavedAddress> {
        self.deciphered = find_by_code_substring(&self.addresses, query).cloned();
        if self.deciphered.is_none() && !query.trim().is_empty() {
            tracing::debug!(query, "No saved address matches");
        }
        self.deciphered.as_ref()
    }

    /// Result of the last [`decipher`](Self::decipher) call.
    #[must_use]
    pub const fn deciphered(&self) -> Option<&SavedAddress> {
        self.deciphered.as_ref()
    }

    fn build(
        &self,
        label: &str,
        note: &str,
        code: String,
        coordinates: Coordinates,
        general_address: String,
    ) -> SavedAddress {
        SavedAddress {
            id: AddressId::generate(),
            user_id: self.user_id.clone(),
            code,
            label: label.to_owned(),
            note: normalize_note(note),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            general_address,
            created_at: Utc::now(),
        }
    }

    fn persist(&mut self, address: SavedAddress) -> Result<SavedAddress, AddressError> {
        self.repo.save(&self.user_id, &address)?;
        self.refresh()?;
        tracing::info!(address_id = %address.id, code = %address.code, "Address saved");
        Ok(address)
    }
}

fn required_label(label: &str) -> Result<&str, AddressError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AddressError::MissingLabel);
    }
    Ok(label)
}
