//! Address book commands.

use geoaddress_client::models::{AddressPatch, SavedAddress};
use geoaddress_client::services::locate::Located;
use geoaddress_client::services::share::{
    current_location_share_text, directions_url, qr_payload, share_text,
};
use geoaddress_client::{ClientState, FileStore};
use geoaddress_core::AddressId;

use super::CommandError;

/// Which hand-off outputs to print for a fresh location fix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Handoff {
    pub share: bool,
    pub navigate: bool,
    pub qr: bool,
}

/// Get a fix for the current location, optionally save it, and print the
/// requested hand-off outputs for it.
///
/// # Errors
///
/// Returns `CommandError` when signed out or when saving fails.
pub async fn generate(
    state: &ClientState<FileStore>,
    save: Option<&str>,
    note: &str,
    handoff: Handoff,
) -> Result<(), CommandError> {
    let session = state.session();
    let mut book = state.address_book(&session)?;

    tracing::info!("Locating...");
    let located = book.locate().await;
    tracing::info!("Your GeoAddress: {}", located.code);
    tracing::info!("{}", located.locality);
    tracing::info!("Coordinates: {}", located.coordinates);

    if let Some(label) = save {
        let saved = book.save_current(label, note)?;
        tracing::info!("Saved as \"{}\" (id {})", saved.label, saved.id);
    } else {
        for address in book.recent() {
            tracing::info!("  recent: {} {}", address.code, address.label);
        }
    }

    if let Some(located) = book.current() {
        for line in current_location_handoff(located, handoff) {
            tracing::info!("{line}");
        }
    }
    Ok(())
}

/// Lines to print for the requested hand-offs of an unsaved fix.
fn current_location_handoff(located: &Located, handoff: Handoff) -> Vec<String> {
    let mut lines = Vec::new();
    if handoff.share {
        lines.extend(current_location_share_text(located).lines().map(str::to_owned));
    }
    if handoff.navigate {
        match directions_url(located.coordinates) {
            Ok(url) => lines.push(url.to_string()),
            Err(e) => tracing::warn!(error = %e, "Location does not form a link"),
        }
    }
    if handoff.qr {
        lines.push(qr_payload(located.code.as_str(), &located.locality));
    }
    lines
}

/// Add an address by hand.
///
/// # Errors
///
/// Returns `CommandError` when signed out, the label is blank or the store
/// fails.
pub fn add(
    state: &ClientState<FileStore>,
    label: &str,
    note: &str,
    code: Option<&str>,
) -> Result<(), CommandError> {
    let session = state.session();
    let mut book = state.address_book(&session)?;
    let saved = book.add(label, note, code)?;
    tracing::info!("Added \"{}\" with code {} (id {})", saved.label, saved.code, saved.id);
    Ok(())
}

/// List saved addresses.
///
/// # Errors
///
/// Returns `CommandError` when signed out or the store fails.
pub fn list(state: &ClientState<FileStore>) -> Result<(), CommandError> {
    let session = state.session();
    let book = state.address_book(&session)?;
    if book.addresses().is_empty() {
        tracing::info!("No saved addresses yet");
        return Ok(());
    }
    for address in book.addresses() {
        log_address(address);
    }
    Ok(())
}

/// Apply the given changes to a saved address.
///
/// # Errors
///
/// Returns `CommandError::EmptyEdit` without changes and
/// `CommandError::AddressNotFound` for an unknown id.
pub fn edit(
    state: &ClientState<FileStore>,
    id: &str,
    label: Option<String>,
    note: Option<String>,
    code: Option<String>,
) -> Result<(), CommandError> {
    let patch = AddressPatch { label, note, code };
    if patch.is_empty() {
        return Err(CommandError::EmptyEdit);
    }
    let session = state.session();
    let mut book = state.address_book(&session)?;
    let id = AddressId::new(id);
    if !book.edit(&id, &patch)? {
        return Err(CommandError::AddressNotFound(id.into_inner()));
    }
    if let Some(address) = book.get(&id) {
        log_address(address);
    }
    Ok(())
}

/// Delete a saved address.
///
/// # Errors
///
/// Returns `CommandError::AddressNotFound` for an unknown id.
pub fn delete(state: &ClientState<FileStore>, id: &str) -> Result<(), CommandError> {
    let session = state.session();
    let mut book = state.address_book(&session)?;
    let id = AddressId::new(id);
    if !book.delete(&id)? {
        return Err(CommandError::AddressNotFound(id.into_inner()));
    }
    tracing::info!("Deleted {id}");
    Ok(())
}

/// Search saved codes.
///
/// # Errors
///
/// Returns `CommandError` when signed out or the store fails. No match is
/// not an error.
pub fn decipher(state: &ClientState<FileStore>, query: &str) -> Result<(), CommandError> {
    let session = state.session();
    let mut book = state.address_book(&session)?;
    match book.decipher(query) {
        Some(address) => log_address(address),
        None => tracing::info!("Address not found: no saved address matches \"{query}\""),
    }
    Ok(())
}

/// Print share text.
///
/// # Errors
///
/// Returns `CommandError::AddressNotFound` for an unknown id.
pub fn share(state: &ClientState<FileStore>, id: &str) -> Result<(), CommandError> {
    with_address(state, id, |address| {
        for line in share_text(address).lines() {
            tracing::info!("{line}");
        }
    })
}

/// Print a directions link.
///
/// # Errors
///
/// Returns `CommandError::AddressNotFound` for an unknown id.
pub fn navigate(state: &ClientState<FileStore>, id: &str) -> Result<(), CommandError> {
    with_address(state, id, |address| {
        match directions_url(address.coordinates()) {
            Ok(url) => tracing::info!("{url}"),
            Err(e) => tracing::warn!(error = %e, "Stored coordinates do not form a link"),
        }
    })
}

/// Print the QR payload.
///
/// # Errors
///
/// Returns `CommandError::AddressNotFound` for an unknown id.
pub fn qr(state: &ClientState<FileStore>, id: &str) -> Result<(), CommandError> {
    with_address(state, id, |address| {
        tracing::info!(
            "{}",
            qr_payload(&address.code, &address.general_address)
        );
    })
}

fn with_address<F>(state: &ClientState<FileStore>, id: &str, f: F) -> Result<(), CommandError>
where
    F: FnOnce(&SavedAddress),
{
    let session = state.session();
    let book = state.address_book(&session)?;
    let address = book
        .get(&AddressId::new(id))
        .ok_or_else(|| CommandError::AddressNotFound(id.to_owned()))?;
    f(address);
    Ok(())
}

fn log_address(address: &SavedAddress) {
    tracing::info!("{}  {}  [{}]", address.code, address.label, address.id);
    tracing::info!("    {}", address.general_address);
    if let Some(note) = &address.note {
        tracing::info!("    {note}");
    }
    tracing::info!(
        "    {}  saved {}",
        address.coordinates(),
        address.created_at.format("%Y-%m-%d")
    );
}
