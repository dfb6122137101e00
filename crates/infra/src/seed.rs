//! Bootstrap data for local development.

use thiserror::Error;

use panel_auth::{PermissionSet, Role, StoreError, User, UserId, hash_password};

use crate::InMemoryDirectory;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to hash seed password: {0}")]
    Hash(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Directory holding a single administrator with every known permission.
pub fn development_directory(username: &str, email: &str, password: &str) -> Result<InMemoryDirectory, SeedError> {
    let directory = InMemoryDirectory::new();
    let role_id = directory.insert_role(Role::new(ADMIN_ROLE, PermissionSet::all()))?;

    let password_hash = hash_password(password).map_err(|e| SeedError::Hash(e.to_string()))?;
    let user_id = directory.insert_user(User {
        id: UserId::new(),
        name: username.to_string(),
        email: email.to_string(),
        password_hash,
        role_id,
    })?;

    tracing::info!(%user_id, username, "seeded development administrator");
    Ok(directory)
}
