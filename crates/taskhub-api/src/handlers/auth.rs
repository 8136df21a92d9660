//! Auth handlers — register, login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use taskhub_core::error::AppError;

use crate::cookies::{REFRESH_COOKIE, clear_session_cookies, set_session_cookies};
use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{
    ApiResponse, IdentityResponse, MessageResponse, RegisterResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
///
/// Creates the account and its owner user. No cookies are set here; the
/// caller logs in afterwards.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    let (account, user) = state
        .account_service
        .register(taskhub_service::account::Registration {
            account_name: req.account_name,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            industry: req.industry,
        })
        .await?;

    Ok(Json(ApiResponse::ok(RegisterResponse {
        account: account.into(),
        user: user.into(),
    })))
}

/// POST /api/auth/login
///
/// Sets both session cookies and returns the caller's identity.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<IdentityResponse>>), ApiError> {
    let tokens = state.session_manager.login(&req.email, &req.password).await?;

    let body = ApiResponse::ok(IdentityResponse::from(&tokens.identity));
    let jar = set_session_cookies(jar, &state.config.auth, &tokens);

    Ok((jar, Json(body)))
}

/// POST /api/auth/refresh
///
/// Rotates the session token pair from the refresh cookie. Any failure
/// clears both cookies so clients fall back to a fresh login instead of
/// retrying a dead token.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let raw = match jar.get(REFRESH_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            let jar = clear_session_cookies(jar, &state.config.auth);
            let err = ApiError::from(AppError::unauthorized("Missing refresh token"));
            return (jar, err).into_response();
        }
    };

    match state.session_manager.refresh(&raw).await {
        Ok(tokens) => {
            let body = ApiResponse::ok(IdentityResponse::from(&tokens.identity));
            let jar = set_session_cookies(jar, &state.config.auth, &tokens);
            (jar, Json(body)).into_response()
        }
        Err(e) => {
            let jar = clear_session_cookies(jar, &state.config.auth);
            (jar, ApiError::from(e)).into_response()
        }
    }
}

/// POST /api/auth/logout
///
/// Revokes the refresh token (idempotently) and clears both cookies.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        let raw = cookie.value().to_string();
        state.session_manager.logout(&raw).await?;
    }

    let jar = clear_session_cookies(jar, &state.config.auth);
    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse::new("Logged out successfully"))),
    ))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<IdentityResponse>> {
    Json(ApiResponse::ok(IdentityResponse {
        id: auth.user_id,
        email: auth.email.clone(),
        role: auth.role,
    }))
}
