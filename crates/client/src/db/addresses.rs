//! Saved address repository (`geoaddress_addresses_{userId}`).

use geoaddress_core::{AddressId, UserId};

use super::{RepositoryError, read_json, write_json};
use crate::models::address::{AddressPatch, SavedAddress};
use crate::models::session::addresses_key;
use crate::storage::KeyValueStore;

/// Repository for a user's saved addresses.
///
/// Every method loads the full collection for one user and, when it changes
/// anything, writes the full collection back.
pub struct AddressRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> AddressRepository<'a, S> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The user's saved addresses in insertion order; empty if none exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the collection is corrupt.
    pub fn list(&self, user_id: &UserId) -> Result<Vec<SavedAddress>, RepositoryError> {
        Ok(read_json(self.store, &addresses_key(user_id))?.unwrap_or_default())
    }

    /// Append `address` to the user's collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the collection is corrupt.
    pub fn save(&self, user_id: &UserId, address: &SavedAddress) -> Result<(), RepositoryError> {
        let mut addresses = self.list(user_id)?;
        addresses.push(address.clone());
        self.write(user_id, &addresses)?;
        tracing::debug!(%user_id, address_id = %address.id, "Saved address");
        Ok(())
    }

    /// Apply `patch` to the address with `id`.
    ///
    /// Returns `false`, without writing, if no address has that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the collection is corrupt.
    pub fn update(
        &self,
        user_id: &UserId,
        id: &AddressId,
        patch: &AddressPatch,
    ) -> Result<bool, RepositoryError> {
        let mut addresses = self.list(user_id)?;
        let Some(address) = addresses.iter_mut().find(|a| a.id == *id) else {
            tracing::debug!(%user_id, address_id = %id, "Update skipped: no such address");
            return Ok(false);
        };
        patch.apply(address);
        self.write(user_id, &addresses)?;
        Ok(true)
    }

    /// Remove the address with `id`.
    ///
    /// Returns `false`, without writing, if no address has that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the collection is corrupt.
    pub fn delete(&self, user_id: &UserId, id: &AddressId) -> Result<bool, RepositoryError> {
        let mut addresses = self.list(user_id)?;
        let before = addresses.len();
        addresses.retain(|a| a.id != *id);
        if addresses.len() == before {
            tracing::debug!(%user_id, address_id = %id, "Delete skipped: no such address");
            return Ok(false);
        }
        self.write(user_id, &addresses)?;
        Ok(true)
    }

    fn write(&self, user_id: &UserId, addresses: &[SavedAddress]) -> Result<(), RepositoryError> {
        write_json(self.store, &addresses_key(user_id), addresses)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::storage::MemoryStore;

    fn address(id: &str, user: &UserId, code: &str) -> SavedAddress {
        SavedAddress {
            id: AddressId::new(id),
            user_id: user.clone(),
            code: code.to_owned(),
            label: format!("Label {id}"),
            note: Some("Near the coffee shop".to_owned()),
            latitude: 6.51,
            longitude: 3.40,
            general_address: "Ikoyi, Lagos State".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_empty_for_unknown_user() {
        let store = MemoryStore::new();
        let repo = AddressRepository::new(&store);
        assert!(repo.list(&UserId::new("nobody")).unwrap().is_empty());
    }

    #[test]
    fn test_save_preserves_fields_and_order() {
        let store = MemoryStore::new();
        let repo = AddressRepository::new(&store);
        let user = UserId::new("u1");
        let first = address("a", &user, "GAN.A1A.AAA");
        let second = address("b", &user, "GAN.B2B.BBB");
        repo.save(&user, &first).unwrap();
        repo.save(&user, &second).unwrap();

        let listed = repo.list(&user).unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[test]
    fn test_collections_are_scoped_per_user() {
        let store = MemoryStore::new();
        let repo = AddressRepository::new(&store);
        let ada = UserId::new("ada");
        let bola = UserId::new("bola");
        repo.save(&ada, &address("a", &ada, "GAN.A1A.AAA")).unwrap();
        assert!(repo.list(&bola).unwrap().is_empty());
    }

    #[test]
    fn test_update_applies_patch() {
        let store = MemoryStore::new();
        let repo = AddressRepository::new(&store);
        let user = UserId::new("u1");
        repo.save(&user, &address("a", &user, "GAN.A1A.AAA")).unwrap();

        let patch = AddressPatch {
            label: Some("Mom's House".to_owned()),
            note: Some(String::new()),
            code: Some("GAN.Q5R.STU".to_owned()),
        };
        assert!(repo.update(&user, &AddressId::new("a"), &patch).unwrap());

        let updated = &repo.list(&user).unwrap()[0];
        assert_eq!(updated.label, "Mom's House");
        assert_eq!(updated.note, None);
        assert_eq!(updated.code, "GAN.Q5R.STU");
        assert_eq!(updated.general_address, "Ikoyi, Lagos State");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = MemoryStore::new();
        let repo = AddressRepository::new(&store);
        let user = UserId::new("u1");
        repo.save(&user, &address("a", &user, "GAN.A1A.AAA")).unwrap();
        let before = repo.list(&user).unwrap();

        let patch = AddressPatch {
            label: Some("x".to_owned()),
            ..AddressPatch::default()
        };
        assert!(!repo.update(&user, &AddressId::new("zzz"), &patch).unwrap());
        assert_eq!(repo.list(&user).unwrap(), before);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let repo = AddressRepository::new(&store);
        let user = UserId::new("u1");
        repo.save(&user, &address("a", &user, "GAN.A1A.AAA")).unwrap();
        repo.save(&user, &address("b", &user, "GAN.B2B.BBB")).unwrap();

        assert!(repo.delete(&user, &AddressId::new("a")).unwrap());
        let ids: Vec<_> = repo
            .list(&user)
            .unwrap()
            .into_iter()
            .map(|a| a.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["b".to_owned()]);

        assert!(!repo.delete(&user, &AddressId::new("a")).unwrap());
        assert_eq!(repo.list(&user).unwrap().len(), 1);
    }
}
