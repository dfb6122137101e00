//! Token issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::{AccessClaims, AuthConfig, Principal, RefreshClaims, TokenError, UserId};

/// Access and refresh token handed out once, at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs access tokens under the access secret and refresh tokens under the
/// refresh secret. Knowing one secret never allows minting the other kind.
#[derive(Clone)]
pub struct TokenIssuer {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

fn sign<C: Serialize>(claims: &C, key: &EncodingKey) -> Result<String, TokenError> {
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, key)
        .map_err(|e| TokenError::Signing(e.to_string()))
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret().as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret().as_bytes()),
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
        }
    }

    pub fn issue_access(&self, principal: &Principal) -> Result<String, TokenError> {
        self.issue_access_at(principal, Utc::now())
    }

    /// Mint an access token carrying `principal`'s permission snapshot,
    /// expiring one access TTL after `now`.
    pub fn issue_access_at(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = AccessClaims::new(principal, now + self.access_ttl);
        sign(&claims, &self.access_key)
    }

    pub fn issue_refresh(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_refresh_at(user_id, Utc::now())
    }

    pub fn issue_refresh_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = RefreshClaims::new(user_id, now + self.refresh_ttl);
        sign(&claims, &self.refresh_key)
    }

    pub fn issue_pair(&self, principal: &Principal) -> Result<TokenPair, TokenError> {
        self.issue_pair_at(principal, Utc::now())
    }

    pub fn issue_pair_at(&self, principal: &Principal, now: DateTime<Utc>) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_at(principal, now)?,
            refresh_token: self.issue_refresh_at(principal.user_id, now)?,
        })
    }
}
