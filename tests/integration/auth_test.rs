//! Integration tests for the session flow: login, refresh rotation,
//! replay rejection, and logout.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn login_sets_both_cookies_and_returns_identity() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "owner@acme.test",
                "password": "Sup3r-secret",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "owner@acme.test");
    assert_eq!(response.data()["role"], "owner");
    assert!(response.cookie("access_token").is_some());
    assert!(response.cookie("refresh_token").is_some());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn login_rejects_wrong_password() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "owner@acme.test",
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn login_rejects_unknown_email_identically() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@acme.test",
                "password": "whatever123A",
            })),
            None,
        )
        .await;

    // Same status as a wrong password, no account enumeration.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn me_requires_authentication() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;

    let unauthenticated = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);

    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&cookies)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["email"], "owner@acme.test");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn refresh_rotates_pair_and_rejects_replay() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    let first = app.request("POST", "/api/auth/refresh", None, Some(&cookies)).await;
    assert_eq!(first.status, StatusCode::OK);
    let rotated = first.cookie("refresh_token").expect("no rotated cookie");
    assert!(!cookies.contains(&rotated), "refresh token was not rotated");

    // Replaying the consumed token fails closed and clears the cookies.
    let replay = app.request("POST", "/api/auth/refresh", None, Some(&cookies)).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.cookie("refresh_token").as_deref(), Some(""));

    // The rotated token is still good for exactly one more redemption.
    let second = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(&format!("refresh_token={rotated}")),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn logout_revokes_the_refresh_token() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    let logout = app.request("POST", "/api/auth/logout", None, Some(&cookies)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let refresh = app.request("POST", "/api/auth/refresh", None, Some(&cookies)).await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn register_rejects_duplicate_email() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "account_name": "Other Co",
                "email": "owner@acme.test",
                "password": "An0ther-secret",
                "first_name": "Dup",
                "last_name": "User",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
