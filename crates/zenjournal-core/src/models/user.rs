//! User model

use serde::{Deserialize, Serialize};

/// A signed-in user, as reported by the remote auth provider.
///
/// Identity comes entirely from Supabase auth; ZenJournal never stores or
/// validates passwords itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auth-provider user id
    pub id: String,
    /// Account email address
    pub email: String,
    /// Display name, taken from the `full_name` signup metadata
    pub name: String,
    /// Account creation timestamp (RFC 3339, as reported by the provider)
    pub created_at: String,
}

impl User {
    /// Fallback display name used when the signup metadata carried none.
    pub const DEFAULT_NAME: &'static str = "User";
}
