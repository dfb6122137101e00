//! Credential verification (login path).

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString},
};

use crate::{AuthError, IdentityStore, Principal};

/// Hash a password using argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Verify a password against a stored PHC-format hash.
///
/// The comparison is constant-time; `Err` means the stored hash itself could
/// not be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Exactly one of username or email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Username(String),
    Email(String),
}

impl LoginIdentifier {
    /// Resolve the identifier from a login body. Empty strings count as absent;
    /// both or neither is a malformed request.
    pub fn from_parts(username: Option<&str>, email: Option<&str>) -> Result<Self, AuthError> {
        let username = username.filter(|s| !s.is_empty());
        let email = email.filter(|s| !s.is_empty());

        match (username, email) {
            (Some(u), None) => Ok(Self::Username(u.to_string())),
            (None, Some(e)) => Ok(Self::Email(e.to_string())),
            (Some(_), Some(_)) => Err(AuthError::malformed("specify either username or email, not both")),
            (None, None) => Err(AuthError::malformed("either username or email must be specified")),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            Self::Email(_) => "email",
        }
    }
}

/// Checks submitted credentials against persistence.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn IdentityStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Look up `identifier` and check `password` against its stored hash.
    ///
    /// Returns the principal to issue tokens for. No side effects.
    pub async fn verify(&self, identifier: &LoginIdentifier, password: &str) -> Result<Principal, AuthError> {
        let found = match identifier {
            LoginIdentifier::Username(name) => self.store.by_username(name).await,
            LoginIdentifier::Email(email) => self.store.by_email(email).await,
        }
        .map_err(|e| {
            tracing::error!(error = %e, "identity lookup failed");
            AuthError::from(e)
        })?;

        let Some(stored) = found else {
            tracing::warn!(by = identifier.kind(), "login for unknown identity");
            return Err(AuthError::IdentityNotFound);
        };

        let matches = verify_password(password, &stored.password_hash).map_err(|e| {
            tracing::error!(user_id = %stored.principal.user_id, error = %e, "stored password hash is unreadable");
            AuthError::StorageFailure("unreadable password hash".to_string())
        })?;

        if !matches {
            tracing::warn!(user_id = %stored.principal.user_id, "password mismatch");
            return Err(AuthError::AuthenticationFailed);
        }

        Ok(stored.principal)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::permissions::{PermissionSet, catalog};
    use crate::{StoreError, StoredCredentials, UserId};

    struct FixtureStore {
        by_name: HashMap<String, StoredCredentials>,
        by_email: HashMap<String, StoredCredentials>,
    }

    #[async_trait]
    impl IdentityStore for FixtureStore {
        async fn by_username(&self, username: &str) -> Result<Option<StoredCredentials>, StoreError> {
            Ok(self.by_name.get(username).cloned())
        }

        async fn by_email(&self, email: &str) -> Result<Option<StoredCredentials>, StoreError> {
            Ok(self.by_email.get(email).cloned())
        }

        async fn by_identity(&self, _user_id: UserId) -> Result<Option<Principal>, StoreError> {
            Ok(None)
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl IdentityStore for BrokenStore {
        async fn by_username(&self, _: &str) -> Result<Option<StoredCredentials>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn by_email(&self, _: &str) -> Result<Option<StoredCredentials>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn by_identity(&self, _: UserId) -> Result<Option<Principal>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn alice() -> (Principal, CredentialVerifier) {
        let principal = Principal::new(UserId::new(), [catalog::USERS_READ].into_iter().collect());
        let stored = StoredCredentials {
            password_hash: hash_password("correct").unwrap(),
            principal: principal.clone(),
        };
        let store = FixtureStore {
            by_name: HashMap::from([("alice".to_string(), stored.clone())]),
            by_email: HashMap::from([("alice@example.com".to_string(), stored)]),
        };
        (principal, CredentialVerifier::new(Arc::new(store)))
    }

    #[test]
    fn password_hash_and_verify() {
        let hash = hash_password("my-secure-password").unwrap();
        assert!(verify_password("my-secure-password", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn password_hashes_are_salted() {
        let hash1 = hash_password("same-password").unwrap();
        let hash2 = hash_password("same-password").unwrap();
        assert_ne!(hash1, hash2);
        assert!(verify_password("same-password", &hash1).unwrap());
        assert!(verify_password("same-password", &hash2).unwrap());
    }

    #[test]
    fn unparseable_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn identifier_requires_exactly_one_field() {
        assert_eq!(
            LoginIdentifier::from_parts(Some("alice"), None).unwrap(),
            LoginIdentifier::Username("alice".to_string())
        );
        assert_eq!(
            LoginIdentifier::from_parts(Some(""), Some("a@example.com")).unwrap(),
            LoginIdentifier::Email("a@example.com".to_string())
        );
        assert!(matches!(
            LoginIdentifier::from_parts(None, None),
            Err(AuthError::RequestMalformed(_))
        ));
        assert!(matches!(
            LoginIdentifier::from_parts(Some(""), Some("")),
            Err(AuthError::RequestMalformed(_))
        ));
        assert!(matches!(
            LoginIdentifier::from_parts(Some("alice"), Some("alice@example.com")),
            Err(AuthError::RequestMalformed(_))
        ));
    }

    #[tokio::test]
    async fn correct_password_yields_principal() {
        let (principal, verifier) = alice();

        let by_name = verifier
            .verify(&LoginIdentifier::Username("alice".into()), "correct")
            .await
            .unwrap();
        assert_eq!(by_name, principal);

        let by_email = verifier
            .verify(&LoginIdentifier::Email("alice@example.com".into()), "correct")
            .await
            .unwrap();
        assert_eq!(by_email, principal);
    }

    #[tokio::test]
    async fn wrong_password_fails_authentication() {
        let (_, verifier) = alice();
        let err = verifier
            .verify(&LoginIdentifier::Username("alice".into()), "wrong")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::AuthenticationFailed);
    }

    #[tokio::test]
    async fn unknown_identity_is_not_found() {
        let (_, verifier) = alice();
        let err = verifier
            .verify(&LoginIdentifier::Username("ghost".into()), "x")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::IdentityNotFound);
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let verifier = CredentialVerifier::new(Arc::new(BrokenStore));
        let err = verifier
            .verify(&LoginIdentifier::Email("alice@example.com".into()), "correct")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StorageFailure(_)));
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_a_storage_failure() {
        let stored = StoredCredentials {
            password_hash: "plaintext-oops".to_string(),
            principal: Principal::new(UserId::new(), PermissionSet::new()),
        };
        let store = FixtureStore {
            by_name: HashMap::from([("bob".to_string(), stored)]),
            by_email: HashMap::new(),
        };
        let verifier = CredentialVerifier::new(Arc::new(store));

        let err = verifier
            .verify(&LoginIdentifier::Username("bob".into()), "plaintext-oops")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StorageFailure(_)));
    }
}
