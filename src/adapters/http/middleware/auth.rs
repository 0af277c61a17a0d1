//! Bearer-token middleware and extractors.
//!
//! The middleware validates tokens through the `TokenAuthority` port and
//! injects the verified claims into request extensions. Handlers opt into
//! enforcement with the `RequireAuth` and `RequireAdmin` extractors; a
//! missing token only fails at extraction time, so public routes share the
//! same stack.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::user::Role;
use crate::ports::{AuthClaims, TokenAuthority};

/// Middleware state: the token verifier.
pub type AuthState = Arc<dyn TokenAuthority>;

/// Validate a Bearer token when present and stash the claims in request
/// extensions. A request without a token passes through untouched; an invalid
/// token is rejected here, before any handler runs.
pub async fn auth_middleware(
    State(authority): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match authority.verify(token) {
            Ok(claims) => {
                request.extensions_mut().insert(claims);
                next.run(request).await
            }
            Err(err) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(err.message())),
            )
                .into_response(),
        },
        None => next.run(request).await,
    }
}

/// Extractor for routes that require an authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthClaims);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthClaims>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for admin-only routes.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthClaims);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            match parts.extensions.get::<AuthClaims>().cloned() {
                Some(claims) if claims.role == Role::Admin => Ok(RequireAdmin(claims)),
                Some(_) => Err(AuthRejection::Forbidden),
                None => Err(AuthRejection::Unauthenticated),
            }
        })
    }
}

/// Extractor for routes that behave differently for guests.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthClaims>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let claims = parts.extensions.get::<AuthClaims>().cloned();
            Ok(OptionalAuth(claims))
        })
    }
}

/// Rejection for the auth extractors.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            AuthRejection::Forbidden => (StatusCode::FORBIDDEN, "Admin access required"),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    fn claims(role: Role) -> AuthClaims {
        AuthClaims {
            user_id: "user-123".to_string(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    fn parts_with(claims: Option<AuthClaims>) -> axum::http::request::Parts {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        if let Some(claims) = claims {
            request.extensions_mut().insert(claims);
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn require_auth_extracts_claims_from_extensions() {
        let mut parts = parts_with(Some(claims(Role::Customer)));
        let RequireAuth(extracted) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted.email, "test@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_claims() {
        let mut parts = parts_with(None);
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn require_admin_rejects_customers() {
        let mut parts = parts_with(Some(claims(Role::Customer)));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::Forbidden)));
    }

    #[tokio::test]
    async fn require_admin_accepts_admins() {
        let mut parts = parts_with(Some(claims(Role::Admin)));
        assert!(RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn optional_auth_returns_none_for_guests() {
        let mut parts = parts_with(None);
        let OptionalAuth(extracted) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(extracted.is_none());
    }

    #[test]
    fn unauthenticated_rejection_is_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn forbidden_rejection_is_403() {
        let response = AuthRejection::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
