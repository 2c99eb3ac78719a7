use crate::auth::guard::{GuardDecision, RouteGuard};
use crate::auth::identity::IdentityProvider;
use crate::types::{Principal, Role};
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Raw bearer token of the current request.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the request's bearer token to a principal. Missing, invalid and
/// revoked tokens all mean "no principal".
pub async fn resolve_principal(
    identity: &dyn IdentityProvider,
    headers: &HeaderMap,
) -> Option<Principal> {
    let token = bearer_token(headers)?;
    match identity.principal_for_token(token).await {
        Ok(principal) => Some(principal),
        Err(e) => {
            debug!(error = %e, "bearer token rejected");
            None
        }
    }
}

/// Gate a route on a signed-in principal and, optionally, a role.
///
/// Redirect decisions become `303 See Other` to the guard's destination.
pub async fn require_access(
    identity: Arc<dyn IdentityProvider>,
    required: Option<Role>,
    mut req: Request,
    next: Next,
) -> Response {
    let principal = resolve_principal(identity.as_ref(), req.headers()).await;

    match (RouteGuard::decide(principal.as_ref(), required), principal) {
        (GuardDecision::Allow, Some(principal)) => {
            if let Some(token) = bearer_token(req.headers()).map(str::to_string) {
                req.extensions_mut().insert(BearerToken(token));
            }
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        (decision, _) => {
            let destination = decision.destination().unwrap_or(crate::auth::guard::SIGN_IN_PATH);
            debug!(?decision, destination, path = %req.uri().path(), "guard redirect");
            Redirect::to(destination).into_response()
        }
    }
}

/// Extractor for the principal inserted by [`require_access`].
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BearerToken>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
