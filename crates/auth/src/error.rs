//! Authentication error taxonomy.

use thiserror::Error;

use crate::{StoreError, TokenError};

/// Failure classes of the access-control core.
///
/// Callers on protected and refresh routes collapse all of these into a single
/// unauthorized response; only the login path distinguishes
/// `IdentityNotFound` from `AuthenticationFailed`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing or ambiguous identifier, or malformed Authorization header.
    #[error("malformed request: {0}")]
    RequestMalformed(String),

    /// Bad password, or a token that failed validation.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("identity not found")]
    IdentityNotFound,

    /// The persistence collaborator failed. Never retried here.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl AuthError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::RequestMalformed(msg.into())
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::StorageFailure(value.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        Self::AuthenticationFailed
    }
}
