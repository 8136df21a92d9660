//! Session cookie transport.
//!
//! The session manager is transport-agnostic; this module turns its raw
//! token pair into the two http-only cookies and back. SameSite is
//! Strict in production configurations and Lax in development so local
//! cross-port frontends keep working.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use taskhub_auth::session::SessionTokens;
use taskhub_core::config::auth::AuthConfig;

/// Cookie carrying the signed access token.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie carrying the raw rotating refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Attach both session cookies with their distinct max-ages.
pub fn set_session_cookies(jar: CookieJar, config: &AuthConfig, tokens: &SessionTokens) -> CookieJar {
    let access = build_cookie(
        config,
        ACCESS_COOKIE,
        tokens.access_token.clone(),
        time::Duration::minutes(config.access_ttl_minutes as i64),
    );
    let refresh = build_cookie(
        config,
        REFRESH_COOKIE,
        tokens.refresh_token.clone(),
        time::Duration::days(config.refresh_ttl_days as i64),
    );
    jar.add(access).add(refresh)
}

/// Remove both session cookies.
pub fn clear_session_cookies(jar: CookieJar, config: &AuthConfig) -> CookieJar {
    let access = build_cookie(config, ACCESS_COOKIE, String::new(), time::Duration::ZERO);
    let refresh = build_cookie(config, REFRESH_COOKIE, String::new(), time::Duration::ZERO);
    jar.add(access).add(refresh)
}

fn build_cookie(
    config: &AuthConfig,
    name: &'static str,
    value: String,
    max_age: time::Duration,
) -> Cookie<'static> {
    let same_site = if config.cookie_same_site_strict {
        SameSite::Strict
    } else {
        SameSite::Lax
    };

    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site)
        .max_age(max_age)
        .build()
}
