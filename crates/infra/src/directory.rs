use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use panel_auth::{
    IdentityStore, PermissionSet, Principal, Role, RoleId, StoreError, StoredCredentials, User, UserId,
};

#[derive(Debug, Default)]
struct Records {
    users: HashMap<UserId, User>,
    roles: HashMap<RoleId, Role>,
}

impl Records {
    fn principal(&self, user: &User) -> Result<Principal, StoreError> {
        let role = self.roles.get(&user.role_id).ok_or_else(|| {
            StoreError::Integrity(format!("user {} references missing role {}", user.id, user.role_id))
        })?;
        Ok(Principal::new(user.id, role.permissions.clone()))
    }

    fn credentials(&self, user: &User) -> Result<StoredCredentials, StoreError> {
        Ok(StoredCredentials {
            password_hash: user.password_hash.clone(),
            principal: self.principal(user)?,
        })
    }
}

/// In-memory user and role directory.
///
/// Intended for tests/dev. Roles are resolved on every lookup, so a change to
/// a role's permissions is visible to the next login or refresh.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    records: RwLock<Records>,
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("directory lock poisoned".to_string())
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_role(&self, role: Role) -> Result<RoleId, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        if records.roles.values().any(|r| r.name == role.name) {
            return Err(StoreError::Integrity(format!("role '{}' already exists", role.name)));
        }
        let id = role.id;
        records.roles.insert(id, role);
        Ok(id)
    }

    /// Insert a user. The referenced role must exist; username and email are
    /// unique (email case-insensitively).
    pub fn insert_user(&self, user: User) -> Result<UserId, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;

        if !records.roles.contains_key(&user.role_id) {
            return Err(StoreError::Integrity(format!("role {} does not exist", user.role_id)));
        }
        if records.users.values().any(|u| u.name == user.name) {
            return Err(StoreError::Integrity(format!("username '{}' is taken", user.name)));
        }
        if records
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::Integrity(format!("email '{}' is taken", user.email)));
        }

        let id = user.id;
        records.users.insert(id, user);
        Ok(id)
    }

    pub fn remove_user(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        Ok(records.users.remove(&user_id))
    }

    /// Replace the permission set of a role.
    pub fn set_role_permissions(&self, role_id: RoleId, permissions: PermissionSet) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let role = records
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| StoreError::Integrity(format!("role {role_id} does not exist")))?;
        role.permissions = permissions;
        tracing::info!(role = %role.name, "role permissions replaced");
        Ok(())
    }

    fn find_credentials<F>(&self, pred: F) -> Result<Option<StoredCredentials>, StoreError>
    where
        F: Fn(&User) -> bool,
    {
        let records = self.records.read().map_err(|_| poisoned())?;
        records
            .users
            .values()
            .find(|u| pred(u))
            .map(|u| records.credentials(u))
            .transpose()
    }
}

#[async_trait]
impl IdentityStore for InMemoryDirectory {
    async fn by_username(&self, username: &str) -> Result<Option<StoredCredentials>, StoreError> {
        self.find_credentials(|u| u.name == username)
    }

    async fn by_email(&self, email: &str) -> Result<Option<StoredCredentials>, StoreError> {
        self.find_credentials(|u| u.email.eq_ignore_ascii_case(email))
    }

    async fn by_identity(&self, user_id: UserId) -> Result<Option<Principal>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        records
            .users
            .get(&user_id)
            .map(|u| records.principal(u))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_auth::catalog;

    fn user(name: &str, email: &str, role_id: RoleId) -> User {
        User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            role_id,
        }
    }

    #[tokio::test]
    async fn lookups_resolve_role_permissions() {
        let dir = InMemoryDirectory::new();
        let role_id = dir
            .insert_role(Role::new("support", [catalog::USERS_READ].into_iter().collect()))
            .unwrap();
        let user_id = dir.insert_user(user("carol", "Carol@Example.com", role_id)).unwrap();

        let by_name = dir.by_username("carol").await.unwrap().unwrap();
        assert_eq!(by_name.principal.user_id, user_id);
        assert!(by_name.principal.permissions.contains(&catalog::USERS_READ));

        let by_email = dir.by_email("carol@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.principal.user_id, user_id);

        let by_id = dir.by_identity(user_id).await.unwrap().unwrap();
        assert_eq!(by_id, by_name.principal);
    }

    #[tokio::test]
    async fn misses_are_none() {
        let dir = InMemoryDirectory::new();
        assert!(dir.by_username("nobody").await.unwrap().is_none());
        assert!(dir.by_email("nobody@example.com").await.unwrap().is_none());
        assert!(dir.by_identity(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn permission_changes_show_up_on_next_lookup() {
        let dir = InMemoryDirectory::new();
        let role_id = dir.insert_role(Role::new("ops", PermissionSet::new())).unwrap();
        let user_id = dir.insert_user(user("dave", "dave@example.com", role_id)).unwrap();

        assert!(dir.by_identity(user_id).await.unwrap().unwrap().permissions.is_empty());

        dir.set_role_permissions(role_id, [catalog::ROLES_READ].into_iter().collect())
            .unwrap();

        let principal = dir.by_identity(user_id).await.unwrap().unwrap();
        assert!(principal.permissions.contains(&catalog::ROLES_READ));
    }

    #[test]
    fn user_must_reference_existing_role() {
        let dir = InMemoryDirectory::new();
        let err = dir.insert_user(user("erin", "erin@example.com", RoleId::new())).unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
    }

    #[test]
    fn usernames_and_emails_are_unique() {
        let dir = InMemoryDirectory::new();
        let role_id = dir.insert_role(Role::new("user", PermissionSet::new())).unwrap();
        dir.insert_user(user("frank", "frank@example.com", role_id)).unwrap();

        assert!(dir.insert_user(user("frank", "other@example.com", role_id)).is_err());
        assert!(dir.insert_user(user("frank2", "FRANK@example.com", role_id)).is_err());
    }
}
