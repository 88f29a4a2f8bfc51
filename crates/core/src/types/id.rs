//! Newtype IDs for type-safe entity references.
//!
//! Stored records carry their IDs as JSON strings. Records written by this
//! crate use random v4 UUIDs; older records may carry millisecond timestamps.
//! Both are accepted, so IDs are opaque strings rather than parsed UUIDs.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `generate()` for a fresh random ID, `as_str()` and `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use geoaddress_core::define_id;
/// define_id!(UserId);
/// define_id!(AddressId);
///
/// let user_id = UserId::new("1717171717171");
/// let address_id = AddressId::generate();
///
/// assert_eq!(user_id.as_str(), "1717171717171");
/// assert_ne!(address_id.as_str(), "");
/// // These are different types, so this won't compile:
/// // let _: UserId = address_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing ID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4().to_string())
            }

            /// Get the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(AddressId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = AddressId::generate();
        let b = AddressId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_timestamp_id_is_kept_verbatim() {
        let id: UserId = serde_json::from_str("\"1717171717171\"").unwrap();
        assert_eq!(id.as_str(), "1717171717171");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1717171717171\"");
    }

    #[test]
    fn test_display_matches_inner() {
        let id = UserId::new("abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(id.into_inner(), "abc");
    }
}
