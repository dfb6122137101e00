//! User record as owned by persistence.

pub use crate::ids::UserId;
use crate::RoleId;

/// A panel user.
///
/// # Invariants
/// - A user references exactly one role at any time.
/// - The core never mutates a user; it only reads what persistence hands it.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Display name, also the login username.
    pub name: String,
    pub email: String,
    /// Encoded password hash (PHC string format).
    pub password_hash: String,
    pub role_id: RoleId,
}

impl core::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role_id", &self.role_id)
            .finish()
    }
}
