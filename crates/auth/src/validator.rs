//! Token parsing and verification.
//!
//! Verification order: declared algorithm, then signature, then payload shape,
//! then expiry. Nothing in the payload is trusted before the signature check.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::claims::{TokenClaims, validate_expiry};
use crate::{AccessClaims, AuthConfig, RefreshClaims};

/// The only accepted value of the JOSE `alg` header.
pub const SIGNING_ALGORITHM: &str = "HS256";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("invalid token signature")]
    SignatureInvalid,

    #[error("unexpected signing method '{0}'")]
    SigningMethodMismatch(String),

    #[error("token has expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

#[derive(Deserialize)]
struct JoseHeader {
    alg: String,
}

/// Read the declared `alg` from the header segment without trusting anything
/// else in the token.
fn declared_algorithm(token: &str) -> Result<String, TokenError> {
    let (header, _) = token.split_once('.').ok_or(TokenError::Malformed)?;
    let raw = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::Malformed)?;
    let header: JoseHeader = serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)?;
    Ok(header.alg)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked by `validate_expiry` against an explicit clock.
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);
    validation
}

/// Verify `token` under `key` and return its claims if valid at `now`.
pub fn parse<C>(token: &str, key: &DecodingKey, now: DateTime<Utc>) -> Result<C, TokenError>
where
    C: DeserializeOwned + TokenClaims,
{
    let alg = declared_algorithm(token)?;
    if alg != SIGNING_ALGORITHM {
        return Err(TokenError::SigningMethodMismatch(alg));
    }

    let data = jsonwebtoken::decode::<C>(token, key, &validation()).map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        ErrorKind::InvalidAlgorithm => TokenError::SigningMethodMismatch(alg.clone()),
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })?;

    validate_expiry(&data.claims, now)?;
    Ok(data.claims)
}

/// Verifies access and refresh tokens, each under its own secret.
#[derive(Clone)]
pub struct TokenValidator {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: DecodingKey::from_secret(config.access_secret().as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret().as_bytes()),
        }
    }

    pub fn parse_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.parse_access_at(token, Utc::now())
    }

    pub fn parse_access_at(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        parse(token, &self.access_key, now)
    }

    pub fn parse_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.parse_refresh_at(token, Utc::now())
    }

    pub fn parse_refresh_at(&self, token: &str, now: DateTime<Utc>) -> Result<RefreshClaims, TokenError> {
        parse(token, &self.refresh_key, now)
    }
}
