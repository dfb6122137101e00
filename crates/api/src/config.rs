//! Process configuration, read once at startup.

use std::net::SocketAddr;

use anyhow::Context;
use axum::http::HeaderValue;

use panel_auth::AuthConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

const DEV_ACCESS_SECRET: &str = "dev-access-secret";
const DEV_REFRESH_SECRET: &str = "dev-refresh-secret";

/// Credentials of the administrator seeded into the in-memory directory.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@localhost".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl core::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    pub cors_origin: HeaderValue,
    pub admin: AdminSeed,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("PANEL_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("PANEL_BIND_ADDR is not a socket address")?;

        let access = lookup("JWT_SECRET_ACCESS").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET_ACCESS not set; using insecure dev default");
            DEV_ACCESS_SECRET.to_string()
        });
        let refresh = lookup("JWT_SECRET_REFRESH").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET_REFRESH not set; using insecure dev default");
            DEV_REFRESH_SECRET.to_string()
        });
        let auth = AuthConfig::new(access, refresh).context("invalid signing secrets")?;

        let cors_origin = lookup("PANEL_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        // Credentialed CORS cannot use a wildcard origin.
        if cors_origin.trim() == "*" {
            anyhow::bail!("PANEL_CORS_ORIGIN must name a single origin; '*' is not allowed with credentials");
        }
        let cors_origin = cors_origin
            .parse::<HeaderValue>()
            .context("PANEL_CORS_ORIGIN is not a valid header value")?;

        let defaults = AdminSeed::default();
        let admin = AdminSeed {
            username: lookup("PANEL_ADMIN_USERNAME").unwrap_or(defaults.username),
            email: lookup("PANEL_ADMIN_EMAIL").unwrap_or(defaults.email),
            password: lookup("PANEL_ADMIN_PASSWORD").unwrap_or_else(|| {
                tracing::warn!("PANEL_ADMIN_PASSWORD not set; seeding admin with insecure dev default");
                defaults.password
            }),
        };

        Ok(Self {
            bind_addr,
            auth,
            cors_origin,
            admin,
        })
    }
}
