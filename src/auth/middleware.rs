use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::jwt::{extract_bearer, JwtKeys};

/// Identity of an authenticated caller (hex user id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

/// Resolves the bearer token into an [`AuthUser`] request extension.
///
/// Requests without a usable token are passed through untouched; resolvers
/// that need an identity deny access themselves.
pub async fn authenticate(State(keys): State<JwtKeys>, mut req: Request, next: Next) -> Response {
    let identity = {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        resolve_identity(&keys, extract_bearer(header))
    };
    if let Some(user) = identity {
        req.extensions_mut().insert(user);
    }
    next.run(req).await
}

fn resolve_identity(keys: &JwtKeys, token: &str) -> Option<AuthUser> {
    if token.is_empty() {
        return None;
    }
    match keys.verify(token) {
        Ok(claim) if claim.is_expired() => {
            debug!(user_id = %claim.user_id, "expired token");
            None
        }
        Ok(claim) => Some(AuthUser(claim.user_id)),
        Err(_) => {
            warn!("invalid token");
            None
        }
    }
}

/// Optional identity set by [`authenticate`]. Never rejects.
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(parts.extensions.get::<AuthUser>().cloned()))
    }
}
