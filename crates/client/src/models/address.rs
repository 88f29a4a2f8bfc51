//! Saved address types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use geoaddress_core::{AddressId, Coordinates, UserId};

/// An address a user has saved under a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    /// Unique within the owner's collection.
    pub id: AddressId,
    /// Owner. Set from the session user; not validated on read.
    pub user_id: UserId,
    /// GeoAddress code. User-entered codes are kept verbatim.
    pub code: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub general_address: String,
    pub created_at: DateTime<Utc>,
}

impl SavedAddress {
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Fields an edit may change. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPatch {
    pub label: Option<String>,
    /// An empty note clears the note.
    pub note: Option<String>,
    pub code: Option<String>,
}

impl AddressPatch {
    /// Whether applying the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.label.is_none() && self.note.is_none() && self.code.is_none()
    }

    /// Apply the patch to `address` in place.
    pub fn apply(&self, address: &mut SavedAddress) {
        if let Some(label) = &self.label {
            address.label.clone_from(label);
        }
        if let Some(note) = &self.note {
            address.note = normalize_note(note);
        }
        if let Some(code) = &self.code {
            address.code.clone_from(code);
        }
    }
}

/// Turn form input into a stored note; blank input means no note.
#[must_use]
pub fn normalize_note(note: &str) -> Option<String> {
    let trimmed = note.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
