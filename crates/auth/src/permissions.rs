use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Capability identifier.
///
/// Permissions are opaque strings compared by exact match (e.g. "users.create").
/// A `Permission` can only be obtained from the [`catalog`], so every value in
/// circulation is a known capability. There is no wildcard and no hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission(Cow<'static, str>);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("unknown permission '{0}'")]
    Unknown(String),
}

impl Permission {
    const fn known(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Resolve a capability identifier against the catalog.
    pub fn parse(name: &str) -> Result<Self, PermissionError> {
        catalog::ALL
            .iter()
            .find(|p| p.as_str() == name)
            .cloned()
            .ok_or_else(|| PermissionError::Unknown(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for Permission {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// The fixed set of capabilities known to the panel.
pub mod catalog {
    use super::Permission;

    pub const USERS_CREATE: Permission = Permission::known("users.create");
    pub const USERS_UPDATE: Permission = Permission::known("users.update");
    pub const USERS_DELETE: Permission = Permission::known("users.delete");
    pub const USERS_READ: Permission = Permission::known("users.read");

    pub const ROLES_CREATE: Permission = Permission::known("roles.create");
    pub const ROLES_UPDATE: Permission = Permission::known("roles.update");
    pub const ROLES_DELETE: Permission = Permission::known("roles.delete");
    pub const ROLES_READ: Permission = Permission::known("roles.read");

    pub const API_KEYS_CREATE: Permission = Permission::known("api_keys.create");
    pub const API_KEYS_DELETE: Permission = Permission::known("api_keys.delete");

    pub const ALL: &[Permission] = &[
        USERS_CREATE,
        USERS_UPDATE,
        USERS_DELETE,
        USERS_READ,
        ROLES_CREATE,
        ROLES_UPDATE,
        ROLES_DELETE,
        ROLES_READ,
        API_KEYS_CREATE,
        API_KEYS_DELETE,
    ];
}

/// Ordered, deduplicated set of permissions (a role's grant, or the snapshot
/// carried by an access token).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Every permission in the catalog.
    pub fn all() -> Self {
        catalog::ALL.iter().cloned().collect()
    }

    /// Build a set from strings loaded out of persistence.
    ///
    /// Unknown identifiers are dropped: they could never match a catalog
    /// permission, so leaving them out does not change any decision.
    pub fn from_stored<I, S>(stored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        stored
            .into_iter()
            .filter_map(|raw| match Permission::parse(raw.as_ref()) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring stored permission");
                    None
                }
            })
            .collect()
    }

    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|p| p.as_str().to_string()).collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::btree_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
