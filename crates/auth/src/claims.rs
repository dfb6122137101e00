use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Permission, PermissionSet, Principal, UserId, validator::TokenError};

/// Claims shared by every token kind.
pub trait TokenClaims {
    /// Absolute expiry as unix seconds.
    fn exp(&self) -> i64;
}

/// Payload of an access token.
///
/// Carries the permission snapshot taken at issuance. The snapshot goes stale
/// if the role changes and is only replaced when a new access token is minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessClaims {
    /// Subject / identity reference.
    pub sub: UserId,

    pub permissions: PermissionSet,

    /// Expiration timestamp (unix seconds).
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(principal: &Principal, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: principal.user_id,
            permissions: principal.permissions.clone(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn has(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

impl TokenClaims for AccessClaims {
    fn exp(&self) -> i64 {
        self.exp
    }
}

/// Payload of a refresh token: identity and expiry, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    pub sub: UserId,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            exp: expires_at.timestamp(),
        }
    }
}

impl TokenClaims for RefreshClaims {
    fn exp(&self) -> i64 {
        self.exp
    }
}

/// Check the embedded expiry against `now`, with no grace period.
///
/// A token is still valid during its `exp` second and expired after it.
pub fn validate_expiry<C: TokenClaims>(claims: &C, now: DateTime<Utc>) -> Result<(), TokenError> {
    if now.timestamp() > claims.exp() {
        return Err(TokenError::Expired);
    }
    Ok(())
}
