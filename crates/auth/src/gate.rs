//! Request gates for bearer-authenticated routes.
//!
//! The gates return the verified claims as a value; the HTTP layer decides
//! where to put them. Every failure is reported as an `AuthError` so callers
//! can collapse them into one unauthorized response.

use chrono::{DateTime, Utc};

use crate::{AccessClaims, AuthError, RefreshClaims, TokenValidator};

/// Extract the token from an `Authorization: <scheme> <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or_else(|| AuthError::malformed("missing Authorization header"))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AuthError::malformed("Authorization header has no scheme separator"))?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::malformed("unsupported authorization scheme"));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::malformed("empty bearer token"));
    }

    Ok(token)
}

/// Access gate: header → verified access claims.
pub fn authenticate_access(
    validator: &TokenValidator,
    header: Option<&str>,
    now: DateTime<Utc>,
) -> Result<AccessClaims, AuthError> {
    let token = bearer_token(header)?;
    validator.parse_access_at(token, now).map_err(|e| {
        tracing::debug!(reason = %e, "access token rejected");
        AuthError::from(e)
    })
}

/// Refresh gate: header → verified refresh claims.
pub fn authenticate_refresh(
    validator: &TokenValidator,
    header: Option<&str>,
    now: DateTime<Utc>,
) -> Result<RefreshClaims, AuthError> {
    let token = bearer_token(header)?;
    validator.parse_refresh_at(token, now).map_err(|e| {
        tracing::debug!(reason = %e, "refresh token rejected");
        AuthError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::catalog;
    use crate::{AuthConfig, Principal, TokenIssuer, UserId};
    use chrono::Duration;

    fn config() -> AuthConfig {
        AuthConfig::new("gate-access", "gate-refresh").unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_767_268_800, 0).unwrap()
    }

    #[test]
    fn bearer_token_requires_scheme_and_token() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(Some("bearer abc")).unwrap(), "abc");

        for header in [None, Some(""), Some("Bearer"), Some("abc.def.ghi"), Some("Bearer "), Some("Basic abc")] {
            assert!(
                matches!(bearer_token(header), Err(AuthError::RequestMalformed(_))),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn access_gate_returns_claims() {
        let principal = Principal::new(UserId::new(), [catalog::ROLES_READ].into_iter().collect());
        let token = TokenIssuer::new(&config()).issue_access_at(&principal, now()).unwrap();
        let header = format!("Bearer {token}");

        let claims = authenticate_access(&TokenValidator::new(&config()), Some(&header), now()).unwrap();
        assert_eq!(claims.sub, principal.user_id);
        assert!(claims.has(&catalog::ROLES_READ));
    }

    #[test]
    fn gates_collapse_token_failures() {
        let validator = TokenValidator::new(&config());
        let issuer = TokenIssuer::new(&config());
        let user_id = UserId::new();

        let refresh = issuer.issue_refresh_at(user_id, now()).unwrap();
        let header = format!("Bearer {refresh}");

        // Refresh token at the access gate.
        assert_eq!(
            authenticate_access(&validator, Some(&header), now()),
            Err(AuthError::AuthenticationFailed)
        );

        // Expired refresh token at the refresh gate.
        let later = now() + Duration::hours(169);
        assert_eq!(
            authenticate_refresh(&validator, Some(&header), later),
            Err(AuthError::AuthenticationFailed)
        );

        assert_eq!(
            authenticate_refresh(&validator, Some(&header), now()).unwrap().sub,
            user_id
        );
    }
}
