//! The explicit session object.
//!
//! A `Session` is created once at start-up from whatever user the store
//! remembers, is handed by reference to anything that needs the current user,
//! and ends with [`Session::logout`]. Its public contract is deliberately
//! coarse: sign-in and sign-up report only success or failure. The typed
//! cause is logged and otherwise dropped.

use std::time::Duration;

use secrecy::SecretString;

use geoaddress_core::SessionState;

use super::auth::{AuthError, AuthService};
use crate::models::user::User;
use crate::storage::KeyValueStore;

/// The current authentication session.
pub struct Session<'a, S: ?Sized> {
    auth: AuthService<'a, S>,
    user: Option<User>,
    state: SessionState,
}

impl<'a, S: KeyValueStore + ?Sized> Session<'a, S> {
    /// Start a session from the user persisted in `store`, if any.
    ///
    /// An unreadable session record is logged and treated as signed out.
    pub fn restore(store: &'a S, auth_latency: Duration) -> Self {
        let auth = AuthService::new(store, auth_latency);
        let user = auth.current_user().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable session record");
            None
        });
        let state = if user.is_some() {
            SessionState::SignedIn
        } else {
            SessionState::SignedOut
        };
        if let Some(user) = &user {
            tracing::debug!(user_id = %user.id, "Restored session");
        }
        Self { auth, user, state }
    }

    /// Sign in. Returns `true` and sets the session user on a credential match.
    ///
    /// On failure the session keeps whatever user it had before.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let password = SecretString::from(password.to_owned());
        let previous = self.begin();
        let result = self.auth.login(email, &password).await;
        self.finish("login", previous, result)
    }

    /// Register and sign in. Returns `false` if the email is already taken or
    /// a required field is invalid.
    pub async fn signup(&mut self, email: &str, password: &str, name: &str) -> bool {
        let password = SecretString::from(password.to_owned());
        let previous = self.begin();
        let result = self.auth.signup(email, &password, name).await;
        self.finish("signup", previous, result)
    }

    /// End the session. Credential records are untouched.
    ///
    /// If the persisted session record cannot be cleared the session stays
    /// signed in, matching what the next [`Session::restore`] would see.
    pub fn logout(&mut self) {
        if let Err(e) = self.auth.logout() {
            tracing::warn!(error = %e, "Failed to clear session record, still signed in");
            return;
        }
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        self.state = SessionState::SignedOut;
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn)
    }

    fn begin(&mut self) -> SessionState {
        let previous = self.state;
        self.state = SessionState::Authenticating;
        previous
    }

    fn finish(
        &mut self,
        action: &'static str,
        previous: SessionState,
        result: Result<User, AuthError>,
    ) -> bool {
        match result {
            Ok(user) => {
                self.user = Some(user);
                self.state = SessionState::SignedIn;
                true
            }
            Err(e) => {
                tracing::warn!(action, error = %e, "Authentication failed");
                self.state = previous;
                false
            }
        }
    }
}
