//! Credential repository (`geoaddress_users`).

use geoaddress_core::Email;

use super::{RepositoryError, read_json, write_json};
use crate::models::session::keys;
use crate::models::user::CredentialRecord;
use crate::storage::KeyValueStore;

/// Repository for credential records.
pub struct UserRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> UserRepository<'a, S> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All credential records, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the list is corrupt.
    pub fn list(&self) -> Result<Vec<CredentialRecord>, RepositoryError> {
        Ok(read_json(self.store, keys::USERS)?.unwrap_or_default())
    }

    /// Find the credential registered under exactly this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the list is corrupt.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<CredentialRecord>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|r| r.email == *email))
    }

    /// Append a new credential record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError` if the store fails or the list is corrupt.
    pub fn create(&self, record: &CredentialRecord) -> Result<(), RepositoryError> {
        let mut records = self.list()?;
        if records.iter().any(|r| r.email == record.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        records.push(record.clone());
        write_json(self.store, keys::USERS, &records)?;
        tracing::debug!(user_id = %record.id, total = records.len(), "Stored credential record");
        Ok(())
    }

    /// Replace the stored record with the same id as `record`.
    ///
    /// Returns `false`, without writing, if no record has that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the list is corrupt.
    pub fn replace(&self, record: &CredentialRecord) -> Result<bool, RepositoryError> {
        let mut records = self.list()?;
        let Some(existing) = records.iter_mut().find(|r| r.id == record.id) else {
            return Ok(false);
        };
        existing.clone_from(record);
        write_json(self.store, keys::USERS, &records)?;
        tracing::debug!(user_id = %record.id, "Replaced credential record");
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use geoaddress_core::UserId;

    use super::*;
    use crate::storage::MemoryStore;

    fn record(id: &str, email: &str) -> CredentialRecord {
        CredentialRecord {
            id: UserId::new(id),
            email: Email::parse(email).unwrap(),
            password_hash: Some("hash".to_owned()),
            password: None,
            name: "Ada".to_owned(),
            phone: None,
        }
    }

    #[test]
    fn test_create_and_lookup() {
        let store = MemoryStore::new();
        let users = UserRepository::new(&store);
        users.create(&record("1", "a@b.com")).unwrap();
        users.create(&record("2", "c@d.com")).unwrap();

        let found = users
            .get_by_email(&Email::parse("c@d.com").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(found.id.as_str(), "2");
        assert_eq!(users.list().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_email_conflicts_without_writing() {
        let store = MemoryStore::new();
        let users = UserRepository::new(&store);
        users.create(&record("1", "a@b.com")).unwrap();
        let result = users.create(&record("2", "a@b.com"));
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(users.list().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_by_id() {
        let store = MemoryStore::new();
        let users = UserRepository::new(&store);
        users.create(&record("1", "a@b.com")).unwrap();

        let mut updated = record("1", "a@b.com");
        updated.password_hash = Some("rehashed".to_owned());
        assert!(users.replace(&updated).unwrap());
        assert_eq!(
            users.list().unwrap()[0].password_hash.as_deref(),
            Some("rehashed")
        );

        assert!(!users.replace(&record("9", "x@y.com")).unwrap());
        assert_eq!(users.list().unwrap().len(), 1);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let store = MemoryStore::new();
        let users = UserRepository::new(&store);
        users.create(&record("1", "a@b.com")).unwrap();
        let found = users
            .get_by_email(&Email::parse("A@b.com").unwrap())
            .unwrap();
        assert!(found.is_none());
    }
}
