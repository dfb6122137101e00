use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Response,
};

use panel_auth::{AccessClaims, PermissionSet, UserId};

use crate::app::errors::unauthorized;

/// Verified access token of the current request.
///
/// Inserted by the access gate. Handlers take it as an extractor; on a route
/// without the gate the extractor answers 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    claims: AccessClaims,
}

impl AccessContext {
    pub fn new(claims: AccessClaims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> UserId {
        self.claims.sub
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.claims.permissions
    }

    pub fn claims(&self) -> &AccessClaims {
        &self.claims
    }
}

/// Identity carried by a verified refresh token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RefreshContext {
    user_id: UserId,
}

impl RefreshContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AccessContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AccessContext>().cloned().ok_or_else(unauthorized)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RefreshContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RefreshContext>().copied().ok_or_else(unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};

    use super::*;

    fn parts(ext: Option<impl Clone + Send + Sync + 'static>) -> Parts {
        let (mut parts, _) = Request::builder().uri("/").body(()).unwrap().into_parts();
        if let Some(ext) = ext {
            parts.extensions.insert(ext);
        }
        parts
    }

    #[tokio::test]
    async fn missing_context_is_unauthorized() {
        let mut no_access = parts(None::<()>);
        let err = AccessContext::from_request_parts(&mut no_access, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let mut no_refresh = parts(None::<()>);
        let err = RefreshContext::from_request_parts(&mut no_refresh, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn gate_inserted_context_is_extracted() {
        let claims = AccessClaims {
            sub: UserId::new(),
            permissions: PermissionSet::new(),
            exp: 0,
        };
        let mut with_access = parts(Some(AccessContext::new(claims.clone())));
        let Ok(ctx) = AccessContext::from_request_parts(&mut with_access, &()).await else {
            panic!("access context should be extracted");
        };
        assert_eq!(ctx.claims(), &claims);

        let user_id = UserId::new();
        let mut with_refresh = parts(Some(RefreshContext::new(user_id)));
        let Ok(ctx) = RefreshContext::from_request_parts(&mut with_refresh, &()).await else {
            panic!("refresh context should be extracted");
        };
        assert_eq!(ctx.user_id(), user_id);
    }
}
