//! Session-related storage keys.

use geoaddress_core::UserId;

/// Storage keys for authentication and address data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "geoaddress_user";

    /// Key for the list of credential records.
    pub const USERS: &str = "geoaddress_users";

    /// Prefix of the per-user address collection key.
    pub const ADDRESSES_PREFIX: &str = "geoaddress_addresses_";
}

/// Key holding the saved addresses of `user_id`.
#[must_use]
pub fn addresses_key(user_id: &UserId) -> String {
    format!("{}{user_id}", keys::ADDRESSES_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_key_is_scoped_by_user() {
        assert_eq!(
            addresses_key(&UserId::new("1717171717171")),
            "geoaddress_addresses_1717171717171"
        );
    }
}
