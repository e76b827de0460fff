//! Account wire types.

use serde::{Deserialize, Serialize};

/// An account as returned by the backend.
///
/// Accounts are never cached client-side; every read re-fetches.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    /// Opaque account id.
    pub id: String,
    /// The account email address.
    pub email: String,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub verified: bool,
    /// Base64-encoded avatar image, if one is set.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Result of a successful sign-up.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatedAccount {
    /// Opaque id of the newly created account.
    pub id: String,
}
