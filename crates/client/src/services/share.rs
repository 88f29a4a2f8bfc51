//! Hand-off helpers: share text, maps deep links and QR payloads.
//!
//! The actual share sheet, clipboard, browser and QR renderer belong to the
//! host platform; these functions only build the strings handed to them.

use url::Url;

use geoaddress_core::Coordinates;

use super::locate::Located;
use crate::models::address::SavedAddress;

/// Label used when sharing a fix that has not been saved.
pub const CURRENT_LOCATION_LABEL: &str = "My Current Location";

/// Share text for a saved address.
#[must_use]
pub fn share_text(address: &SavedAddress) -> String {
    format_share(&address.label, &address.code, &address.general_address)
}

/// Share text for an unsaved location fix.
#[must_use]
pub fn current_location_share_text(located: &Located) -> String {
    format_share(
        CURRENT_LOCATION_LABEL,
        located.code.as_str(),
        &located.locality,
    )
}

fn format_share(label: &str, code: &str, general_address: &str) -> String {
    format!("📍 {label}\nGeoAddress: {code}\n{general_address}\n\nShared via GeoAddress NG")
}

/// Google Maps directions link to `destination`.
///
/// # Errors
///
/// Returns `url::ParseError` if the coordinates do not form a valid URL
/// (only possible for non-finite values).
pub fn directions_url(destination: Coordinates) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "https://www.google.com/maps/dir/?api=1&destination={destination}"
    ))
}

/// Text encoded into the QR code for an address.
#[must_use]
pub fn qr_payload(code: &str, general_address: &str) -> String {
    format!("{code} - {general_address}")
}
