//! `AuthUser` extractor — resolves the authenticated caller from the
//! access token cookie or an Authorization bearer header.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use taskhub_core::error::AppError;
use taskhub_service::context::RequestContext;

use crate::cookies::ACCESS_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A guard middleware may have authenticated this request already.
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(AuthUser(ctx.clone()));
        }

        let ctx = request_context(state, &parts.headers)?;
        Ok(AuthUser(ctx))
    }
}

/// Build a request context from the verified access token.
///
/// Accepts either a `Bearer` Authorization header or the access token
/// cookie; every failure surfaces as `Unauthorized`.
pub fn request_context(state: &AppState, headers: &HeaderMap) -> Result<RequestContext, AppError> {
    let token = bearer_token(headers)
        .or_else(|| cookie_token(headers))
        .ok_or_else(|| AppError::unauthorized("Missing access token"))?;

    let claims = state.jwt_decoder.decode(&token)?;
    Ok(RequestContext::new(claims.sub, claims.email, claims.role))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
}
