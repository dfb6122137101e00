use serde::{Deserialize, Serialize};

use crate::{PermissionSet, UserId};

/// Identity plus the permission snapshot of its role, as resolved by
/// persistence at lookup time.
///
/// This is what the token issuer signs into an access token; it is a copy,
/// not a live reference to the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub permissions: PermissionSet,
}

impl Principal {
    pub fn new(user_id: UserId, permissions: PermissionSet) -> Self {
        Self {
            user_id,
            permissions,
        }
    }
}
