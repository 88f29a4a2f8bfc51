//! Status enums.

use serde::{Deserialize, Serialize};

/// Authentication state of a session.
///
/// ```text
/// SignedOut --login/signup--> Authenticating --match/created--> SignedIn
///     ^                             |                              |
///     +------- mismatch/conflict ---+                              |
///     +------------------------------ logout ----------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    SignedOut,
    Authenticating,
    SignedIn,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignedOut => write!(f, "signed_out"),
            Self::Authenticating => write!(f, "authenticating"),
            Self::SignedIn => write!(f, "signed_in"),
        }
    }
}
