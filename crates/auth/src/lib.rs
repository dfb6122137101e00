//! `panel-auth`: access-control core of the panel backend.
//!
//! Credential verification, token issuance and validation, and permission
//! checks. This crate is intentionally decoupled from HTTP and storage: it
//! consumes persistence through [`IdentityStore`] and nothing else.

pub mod authorize;
pub mod claims;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod ids;
pub mod issuer;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod store;
pub mod user;
pub mod validator;

pub use authorize::{AuthzError, has_permission, require_permission};
pub use claims::{AccessClaims, RefreshClaims, TokenClaims};
pub use config::{AuthConfig, ConfigError, SigningSecret};
pub use credentials::{CredentialVerifier, LoginIdentifier, hash_password, verify_password};
pub use error::AuthError;
pub use gate::{authenticate_access, authenticate_refresh, bearer_token};
pub use issuer::{TokenIssuer, TokenPair};
pub use permissions::{Permission, PermissionError, PermissionSet, catalog};
pub use principal::Principal;
pub use roles::{Role, RoleId};
pub use store::{IdentityStore, StoreError, StoredCredentials};
pub use user::{User, UserId};
pub use validator::{TokenError, TokenValidator};
