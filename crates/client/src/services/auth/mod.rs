//! Authentication service.
//!
//! Mock email/password authentication against the credential list in the
//! blob store. Sign-in and sign-up wait a fixed, configurable delay before
//! touching the store, standing in for a network round trip. The delay cannot
//! be cancelled and nothing is retried.

mod error;

pub use error::AuthError;

use std::time::Duration;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use geoaddress_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::session::SessionRepository;
use crate::db::users::UserRepository;
use crate::models::user::{CredentialRecord, User};
use crate::storage::KeyValueStore;

/// Authentication service.
///
/// Handles registration, login and logout, and owns the persisted session
/// record (`geoaddress_user`).
pub struct AuthService<'a, S: ?Sized> {
    users: UserRepository<'a, S>,
    sessions: SessionRepository<'a, S>,
    latency: Duration,
}

impl<'a, S: KeyValueStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a S, latency: Duration) -> Self {
        Self {
            users: UserRepository::new(store),
            sessions: SessionRepository::new(store),
            latency,
        }
    }

    /// Register a new user and start a session for them.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::MissingField` if the password or name is blank.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn signup(
        &self,
        email: &str,
        password: &SecretString,
        name: &str,
    ) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let email = Email::parse(email)?;
        validate_password(password)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }

        if self.users.get_by_email(&email)?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let record = CredentialRecord {
            id: UserId::generate(),
            email,
            password_hash: Some(hash_password(password)?),
            password: None,
            name: name.to_owned(),
            phone: None,
        };
        self.users.create(&record).map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        let user = record.to_user();
        self.sessions.set(&user)?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Login with email and password and start a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let email = Email::parse(email)?;
        let record = self
            .users
            .get_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        match (&record.password_hash, &record.password) {
            (Some(hash), _) => verify_password(password, hash)?,
            (None, Some(plaintext)) => {
                if password.expose_secret() != plaintext.as_str() {
                    return Err(AuthError::InvalidCredentials);
                }
                self.upgrade_legacy(&record, password)?;
            }
            (None, None) => return Err(AuthError::InvalidCredentials),
        }

        let user = record.to_user();
        self.sessions.set(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Clear the persisted session. Credential records are untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store fails.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear()?;
        Ok(())
    }

    /// The persisted session user, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store fails or the record is corrupt.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.sessions.get()?)
    }

    /// Swap a legacy plaintext password for an Argon2id hash.
    fn upgrade_legacy(
        &self,
        record: &CredentialRecord,
        password: &SecretString,
    ) -> Result<(), AuthError> {
        let upgraded = CredentialRecord {
            password_hash: Some(hash_password(password)?),
            password: None,
            ..record.clone()
        };
        self.users.replace(&upgraded)?;
        tracing::info!(user_id = %record.id, "Upgraded legacy password to Argon2id");
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Validate password is present. There is no strength requirement.
fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().trim().is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &SecretString) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &SecretString, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[tokio::test]
    async fn test_signup_creates_credential_and_session() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, Duration::ZERO);

        let user = auth.signup("a@b.com", &secret("pw"), "Ada").await.unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(auth.current_user().unwrap(), Some(user));

        let records = UserRepository::new(&store).list().unwrap();
        assert_eq!(records.len(), 1);
        let hash = records[0].password_hash.as_deref().unwrap();
        assert_ne!(hash, "pw");
        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(records[0].password, None);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, Duration::ZERO);
        auth.signup("a@b.com", &secret("pw"), "Ada").await.unwrap();

        let result = auth.signup("a@b.com", &secret("other"), "Imposter").await;
        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
        assert_eq!(UserRepository::new(&store).list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, Duration::ZERO);

        assert!(matches!(
            auth.signup("not-an-email", &secret("pw"), "Ada").await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.signup("a@b.com", &secret(""), "Ada").await,
            Err(AuthError::MissingField("password"))
        ));
        assert!(matches!(
            auth.signup("a@b.com", &secret("pw"), "   ").await,
            Err(AuthError::MissingField("name"))
        ));
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_login_checks_password() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, Duration::ZERO);
        auth.signup("a@b.com", &secret("pw"), "Ada").await.unwrap();
        auth.logout().unwrap();

        assert!(matches!(
            auth.login("a@b.com", &secret("wrong")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert_eq!(auth.current_user().unwrap(), None);

        let user = auth.login("a@b.com", &secret("pw")).await.unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(auth.current_user().unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, Duration::ZERO);
        assert!(matches!(
            auth.login("nobody@b.com", &secret("pw")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    fn store_legacy_user(store: &MemoryStore) {
        store
            .set(
                "geoaddress_users",
                r#"[{"id":"1714550000000","email":"old@b.com","password":"pw","name":"Old"}]"#,
            )
            .unwrap();
    }

    #[tokio::test]
    async fn test_legacy_plaintext_login_upgrades_record() {
        let store = MemoryStore::new();
        store_legacy_user(&store);
        let auth = AuthService::new(&store, Duration::ZERO);

        assert!(matches!(
            auth.login("old@b.com", &secret("wrong")).await,
            Err(AuthError::InvalidCredentials)
        ));

        let user = auth.login("old@b.com", &secret("pw")).await.unwrap();
        assert_eq!(user.id.as_str(), "1714550000000");

        let record = UserRepository::new(&store).list().unwrap().remove(0);
        assert_eq!(record.password, None);
        assert!(record.password_hash.unwrap().starts_with("$argon2id$"));

        auth.logout().unwrap();
        assert!(auth.login("old@b.com", &secret("pw")).await.is_ok());
    }

    #[tokio::test]
    async fn test_signup_alongside_legacy_records() {
        let store = MemoryStore::new();
        store_legacy_user(&store);
        let auth = AuthService::new(&store, Duration::ZERO);

        auth.signup("new@b.com", &secret("pw"), "New").await.unwrap();
        assert!(matches!(
            auth.signup("old@b.com", &secret("pw"), "Again").await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert_eq!(UserRepository::new(&store).list().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_latency() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store, Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        let _ = auth.login("a@b.com", &secret("pw")).await;
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
