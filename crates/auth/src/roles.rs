pub use crate::ids::RoleId;
use crate::PermissionSet;

/// Named bundle of permissions assigned to users.
///
/// The permission set is validated against the catalog when the role is
/// loaded, so a role can only ever grant known capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub permissions: PermissionSet,
}

impl Role {
    pub fn new(name: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            id: RoleId::new(),
            name: name.into(),
            permissions,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
