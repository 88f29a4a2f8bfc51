//! Decipher: find a saved address from (part of) its code.
//!
//! A linear scan over the loaded list. There is no index; lists are small.

use crate::models::address::SavedAddress;

/// First address whose code contains `query`, ignoring case.
///
/// Iteration follows insertion order, so when several codes match the oldest
/// saved address wins. A blank query matches nothing.
#[must_use]
pub fn find_by_code_substring<'a>(
    addresses: &'a [SavedAddress],
    query: &str,
) -> Option<&'a SavedAddress> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    addresses
        .iter()
        .find(|a| a.code.to_lowercase().contains(&needle))
}
