//! Bulk import of addresses from a YAML file.
//!
//! # Format
//!
//! ```yaml
//! - label: Home
//!   note: Blue gate
//! - label: Office
//!   code: GAN.K7Q.XYZ
//! ```
//!
//! Entries without a code get a generated one. The whole file is validated
//! before anything is written.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use geoaddress_client::{ClientState, FileStore};

/// One address to import.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportEntry {
    pub label: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Problems found in an import file, one message per bad entry.
#[must_use]
pub fn validate(entries: &[ImportEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.label.trim().is_empty())
        .map(|(index, _)| format!("entry {}: label is required", index + 1))
        .collect()
}

/// Parse the YAML text of an import file.
///
/// # Errors
///
/// Returns `serde_yaml::Error` if the text is not a list of entries.
pub fn parse(content: &str) -> Result<Vec<ImportEntry>, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Import addresses from `file_path` into the signed-in user's book.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any entry is
/// invalid, the user is signed out, or the store fails.
pub async fn addresses(
    state: &ClientState<FileStore>,
    file_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file_path.exists() {
        return Err(format!("File not found: {}", file_path.display()).into());
    }

    info!(path = %file_path.display(), "Loading addresses from file");
    let content = tokio::fs::read_to_string(file_path).await?;
    let entries = parse(&content)?;

    let errors = validate(&entries);
    if !errors.is_empty() {
        error!("Import file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let session = state.session();
    let mut book = state.address_book(&session)?;
    for entry in &entries {
        let saved = book.add(
            &entry.label,
            entry.note.as_deref().unwrap_or_default(),
            entry.code.as_deref(),
        )?;
        info!("  {}  {}", saved.code, saved.label);
    }

    info!("Imported {} addresses", entries.len());
    Ok(())
}
