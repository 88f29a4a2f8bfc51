//! Integration tests for the address book over the file-backed store.

#![allow(clippy::unwrap_used)]

use geoaddress_client::models::AddressPatch;
use geoaddress_client::services::share;
use geoaddress_client::{AddressError, ClientState, FileStore};
use geoaddress_core::{AddressId, GeoCode};
use geoaddress_integration_tests::TestContext;

async fn sign_up(state: &ClientState<FileStore>, email: &str) {
    assert!(state.session().signup(email, "pw", "Test User").await);
}

// ============================================================================
// Generate and save
// ============================================================================

#[tokio::test]
async fn test_generate_and_save_current() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx.state, "a@b.com").await;
    let session = ctx.state.session();
    let mut book = ctx.state.address_book(&session).unwrap();

    let code = book.locate().await.code.clone();
    assert!(GeoCode::parse(code.as_str()).is_ok());

    let saved = book.save_current("Home", "Blue gate").unwrap();
    assert_eq!(saved.code, code.as_str());
    assert_eq!(book.recent().len(), 1);
}

#[tokio::test]
async fn test_signed_out_cannot_open_book() {
    let ctx = TestContext::new().unwrap();
    let session = ctx.state.session();
    assert!(matches!(
        ctx.state.address_book(&session),
        Err(AddressError::NotSignedIn)
    ));
}

// ============================================================================
// Edit / delete
// ============================================================================

#[tokio::test]
async fn test_edit_unknown_id_changes_nothing() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx.state, "a@b.com").await;
    let session = ctx.state.session();
    let mut book = ctx.state.address_book(&session).unwrap();
    let saved = book.add("Home", "", None).unwrap();

    let patch = AddressPatch {
        label: Some("Elsewhere".to_owned()),
        ..AddressPatch::default()
    };
    assert!(!book.edit(&AddressId::new("missing"), &patch).unwrap());
    assert_eq!(book.addresses(), std::slice::from_ref(&saved));
}

#[tokio::test]
async fn test_edit_and_delete_persist() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx.state, "a@b.com").await;
    let session = ctx.state.session();
    let mut book = ctx.state.address_book(&session).unwrap();
    let home = book.add("Home", "", None).unwrap();
    let office = book.add("Office", "", Some("GAN.K7Q.XYZ")).unwrap();

    let patch = AddressPatch {
        code: Some("GAN.A1B.CDE".to_owned()),
        ..AddressPatch::default()
    };
    assert!(book.edit(&office.id, &patch).unwrap());
    assert!(book.delete(&home.id).unwrap());

    let other = ctx.reopen().unwrap();
    let other_session = other.session();
    let reloaded = other.address_book(&other_session).unwrap();
    assert_eq!(reloaded.addresses().len(), 1);
    assert_eq!(reloaded.addresses()[0].code, "GAN.A1B.CDE");
    assert_eq!(reloaded.addresses()[0].label, "Office");
}

// ============================================================================
// Decipher and hand-off
// ============================================================================

#[tokio::test]
async fn test_decipher_finds_partial_code() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx.state, "a@b.com").await;
    let session = ctx.state.session();
    let mut book = ctx.state.address_book(&session).unwrap();
    let saved = book.add("Shop", "", Some("GAN.F84G.ABC")).unwrap();

    assert_eq!(book.decipher("f84g").map(|a| &a.id), Some(&saved.id));
    assert!(book.decipher("nothing").is_none());
}

#[tokio::test]
async fn test_share_outputs_for_saved_address() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx.state, "a@b.com").await;
    let session = ctx.state.session();
    let mut book = ctx.state.address_book(&session).unwrap();
    let saved = book.add("Shop", "", Some("GAN.F8G.ABC")).unwrap();

    let text = share::share_text(&saved);
    assert!(text.contains("GeoAddress: GAN.F8G.ABC"));
    assert!(text.contains("Shop, Lagos State, Nigeria"));

    let url = share::directions_url(saved.coordinates()).unwrap();
    assert_eq!(url.host_str(), Some("www.google.com"));
    assert_eq!(
        share::qr_payload(&saved.code, &saved.general_address),
        "GAN.F8G.ABC - Shop, Lagos State, Nigeria"
    );
}

// ============================================================================
// Per-user isolation
// ============================================================================

#[tokio::test]
async fn test_users_do_not_see_each_others_addresses() {
    let ctx = TestContext::new().unwrap();
    sign_up(&ctx.state, "a@b.com").await;
    {
        let session = ctx.state.session();
        let mut book = ctx.state.address_book(&session).unwrap();
        book.add("Ada's home", "", None).unwrap();
    }

    ctx.state.session().logout();
    sign_up(&ctx.state, "c@d.com").await;
    let session = ctx.state.session();
    let book = ctx.state.address_book(&session).unwrap();
    assert!(book.addresses().is_empty());
}
