use thiserror::Error;

use crate::{AccessClaims, Permission};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),
}

/// Exact membership test over the token's permission snapshot.
///
/// - No IO
/// - No panics
/// - No hierarchy or wildcard
pub fn has_permission(claims: &AccessClaims, required: &Permission) -> bool {
    claims.permissions.contains(required)
}

/// Like [`has_permission`], for handlers that want to bail out with `?`.
pub fn require_permission(claims: &AccessClaims, required: &Permission) -> Result<(), AuthzError> {
    if has_permission(claims, required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{PermissionSet, catalog};
    use crate::UserId;

    fn claims(permissions: PermissionSet) -> AccessClaims {
        AccessClaims {
            sub: UserId::new(),
            permissions,
            exp: 0,
        }
    }

    #[test]
    fn granted_permission_is_allowed() {
        let claims = claims([catalog::USERS_CREATE].into_iter().collect());
        assert!(has_permission(&claims, &catalog::USERS_CREATE));
        assert!(require_permission(&claims, &catalog::USERS_CREATE).is_ok());
    }

    #[test]
    fn related_permission_does_not_imply_another() {
        let claims = claims([catalog::USERS_CREATE, catalog::USERS_UPDATE].into_iter().collect());
        assert!(!has_permission(&claims, &catalog::USERS_DELETE));
        assert_eq!(
            require_permission(&claims, &catalog::USERS_DELETE),
            Err(AuthzError::Forbidden(catalog::USERS_DELETE))
        );
    }

    #[test]
    fn empty_snapshot_grants_nothing() {
        let claims = claims(PermissionSet::new());
        assert!(catalog::ALL.iter().all(|p| !has_permission(&claims, p)));
    }

    #[test]
    fn full_snapshot_grants_everything() {
        let claims = claims(PermissionSet::all());
        assert!(catalog::ALL.iter().all(|p| has_permission(&claims, p)));
    }
}
