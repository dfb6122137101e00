use std::sync::Arc;

use panel_auth::{AuthConfig, CredentialVerifier, IdentityStore, TokenIssuer, TokenValidator};

/// Shared, read-only request state. Signing keys are derived once here and
/// never change for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<TokenValidator>,
    pub credentials: CredentialVerifier,
    pub store: Arc<dyn IdentityStore>,
}

impl AppState {
    pub fn new(auth: &AuthConfig, store: Arc<dyn IdentityStore>) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::new(auth)),
            validator: Arc::new(TokenValidator::new(auth)),
            credentials: CredentialVerifier::new(store.clone()),
            store,
        }
    }
}
