//! Signing configuration.
//!
//! Built once at process start and shared read-only for the process lifetime.
//! There is no rotation; changing a secret requires a restart.

use chrono::Duration;
use thiserror::Error;

/// HMAC key material. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

impl From<&str> for SigningSecret {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for SigningSecret {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} secret must not be empty")]
    EmptySecret(&'static str),

    #[error("access and refresh tokens must be signed with different secrets")]
    SharedSecret,

    #[error("{0} token lifetime must be positive")]
    NonPositiveTtl(&'static str),
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    access_secret: SigningSecret,
    refresh_secret: SigningSecret,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl AuthConfig {
    pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 15;
    pub const DEFAULT_REFRESH_TTL_HOURS: i64 = 168;

    /// Create a configuration with the default lifetimes (15 minutes access,
    /// 7 days refresh).
    pub fn new(
        access_secret: impl Into<SigningSecret>,
        refresh_secret: impl Into<SigningSecret>,
    ) -> Result<Self, ConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        if access_secret.is_empty() {
            return Err(ConfigError::EmptySecret("access"));
        }
        if refresh_secret.is_empty() {
            return Err(ConfigError::EmptySecret("refresh"));
        }
        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl: Duration::minutes(Self::DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::hours(Self::DEFAULT_REFRESH_TTL_HOURS),
        })
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Result<Self, ConfigError> {
        if ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl("access"));
        }
        self.access_ttl = ttl;
        Ok(self)
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Result<Self, ConfigError> {
        if ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl("refresh"));
        }
        self.refresh_ttl = ttl;
        Ok(self)
    }

    pub fn access_secret(&self) -> &SigningSecret {
        &self.access_secret
    }

    pub fn refresh_secret(&self) -> &SigningSecret {
        &self.refresh_secret
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}
