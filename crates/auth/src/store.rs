//! Persistence collaborator contract.
//!
//! The core only ever reads through this trait. Implementations own the
//! user and role records and resolve a user's role into a [`Principal`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{Principal, UserId};

/// Password hash plus resolved principal, returned on the login path only.
#[derive(Clone)]
pub struct StoredCredentials {
    pub password_hash: String,
    pub principal: Principal,
}

impl core::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("password_hash", &"<redacted>")
            .field("principal", &self.principal)
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("integrity violation: {0}")]
    Integrity(String),
}

/// Lookups consumed by the access-control core.
///
/// A miss is `Ok(None)`; `Err` is reserved for storage failures.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn by_username(&self, username: &str) -> Result<Option<StoredCredentials>, StoreError>;

    async fn by_email(&self, email: &str) -> Result<Option<StoredCredentials>, StoreError>;

    async fn by_identity(&self, user_id: UserId) -> Result<Option<Principal>, StoreError>;
}

#[async_trait]
impl<S> IdentityStore for Arc<S>
where
    S: IdentityStore + ?Sized,
{
    async fn by_username(&self, username: &str) -> Result<Option<StoredCredentials>, StoreError> {
        (**self).by_username(username).await
    }

    async fn by_email(&self, email: &str) -> Result<Option<StoredCredentials>, StoreError> {
        (**self).by_email(email).await
    }

    async fn by_identity(&self, user_id: UserId) -> Result<Option<Principal>, StoreError> {
        (**self).by_identity(user_id).await
    }
}
