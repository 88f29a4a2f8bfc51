//! User domain types.

use serde::{Deserialize, Serialize};

use geoaddress_core::{Email, UserId};

/// The signed-in user, as held by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A stored credential used for mock sign-in.
///
/// Kept in the `geoaddress_users` list, separate from the session user.
/// Created on sign-up and never deleted. Records written by the web front
/// end carry a plaintext `password` instead of `passwordHash`; the first
/// successful sign-in replaces it with a hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: UserId,
    /// Unique across all records (exact comparison).
    pub email: Email,
    /// Argon2id PHC string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Legacy plaintext password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CredentialRecord {
    /// The session view of this credential.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record() -> CredentialRecord {
        CredentialRecord {
            id: UserId::new("1"),
            email: Email::parse("a@b.com").unwrap(),
            password_hash: Some("$argon2id$v=19$secret".to_owned()),
            password: None,
            name: "Ada".to_owned(),
            phone: None,
        }
    }

    #[test]
    fn test_user_json_shape() {
        let user = record().to_user();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1", "email": "a@b.com", "name": "Ada"})
        );
    }

    #[test]
    fn test_user_reads_phone_when_present() {
        let user: User = serde_json::from_str(
            r#"{"id":"1","email":"a@b.com","name":"Ada","phone":"+2348000000000"}"#,
        )
        .unwrap();
        assert_eq!(user.phone.as_deref(), Some("+2348000000000"));
    }

    #[test]
    fn test_credential_uses_camel_case() {
        let json = serde_json::to_string(&record()).unwrap();
        assert!(json.contains("\"passwordHash\""));
        assert!(!json.contains("\"password\""));
    }

    #[test]
    fn test_credential_reads_legacy_plaintext() {
        let record: CredentialRecord = serde_json::from_str(
            r#"{"id":"1714550000000","email":"old@b.com","password":"pw","name":"Old"}"#,
        )
        .unwrap();
        assert_eq!(record.password.as_deref(), Some("pw"));
        assert_eq!(record.password_hash, None);
        assert!(!format!("{record:?}").contains("\"pw\""));
    }

    #[test]
    fn test_credential_debug_redacts_hash() {
        let debug = format!("{:?}", record());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("argon2id"));
    }
}
