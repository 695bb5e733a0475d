use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use attendly_auth::{AuthError, SessionAuthenticator};

use crate::app::errors::auth_error_to_response;
use crate::context::IdentityContext;

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<SessionAuthenticator>,
}

/// Authenticate the bearer credential and attach an [`IdentityContext`].
///
/// Runs before every protected route: a missing or invalid credential is
/// rejected here, before any role or token logic executes. The raw credential
/// is handed to the authenticator and nowhere else.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let bearer = extract_bearer(req.headers())
        .ok_or_else(|| auth_error_to_response(AuthError::Unauthenticated))?;

    let identity = state
        .authenticator
        .authenticate(bearer, Utc::now())
        .map_err(auth_error_to_response)?;

    req.extensions_mut().insert(IdentityContext::new(identity));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() { None } else { Some(token) }
}
