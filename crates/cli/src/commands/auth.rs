//! Session commands.

use geoaddress_client::{ClientState, FileStore};

use super::CommandError;

/// Register and sign in.
///
/// # Errors
///
/// Returns `CommandError::AuthFailed` if the email is taken or a field is
/// invalid.
pub async fn signup(
    state: &ClientState<FileStore>,
    email: &str,
    password: &str,
    name: &str,
) -> Result<(), CommandError> {
    let mut session = state.session();
    if !session.signup(email, password, name).await {
        return Err(CommandError::AuthFailed("Sign up"));
    }
    tracing::info!("Welcome, {name}! You are signed in as {email}.");
    Ok(())
}

/// Sign in.
///
/// # Errors
///
/// Returns `CommandError::AuthFailed` on bad credentials.
pub async fn login(
    state: &ClientState<FileStore>,
    email: &str,
    password: &str,
) -> Result<(), CommandError> {
    let mut session = state.session();
    if !session.login(email, password).await {
        return Err(CommandError::AuthFailed("Sign in"));
    }
    if let Some(user) = session.user() {
        tracing::info!("Signed in as {} <{}>", user.name, user.email);
    }
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns `CommandError::AuthFailed` if the session record could not be
/// cleared.
pub fn logout(state: &ClientState<FileStore>) -> Result<(), CommandError> {
    let mut session = state.session();
    session.logout();
    if session.is_signed_in() {
        return Err(CommandError::AuthFailed("Sign out"));
    }
    tracing::info!("Signed out");
    Ok(())
}

/// Show the signed-in user.
///
/// # Errors
///
/// Returns `AddressError::NotSignedIn` without a session.
pub fn whoami(state: &ClientState<FileStore>) -> Result<(), CommandError> {
    let session = state.session();
    let user = session
        .user()
        .ok_or(geoaddress_client::AddressError::NotSignedIn)?;
    tracing::info!("{} <{}>", user.name, user.email);
    if let Some(phone) = &user.phone {
        tracing::info!("Phone: {phone}");
    }
    tracing::info!("User id: {}", user.id);
    Ok(())
}
