//! Integration tests for the invitation lifecycle.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

async fn create_invite(
    app: &helpers::TestApp,
    cookies: &str,
    email: &str,
    role: &str,
) -> helpers::TestResponse {
    app.request(
        "POST",
        "/api/account-invites/invite",
        Some(serde_json::json!({ "email": email, "role": role })),
        Some(cookies),
    )
    .await
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn create_validate_accept_flow_escalates_existing_user() {
    let app = helpers::TestApp::new().await;
    let owner_id = app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let acme_account = app.account_of(owner_id).await;
    // Bob already exists as the owner of his own account.
    app.register_account("Bobs Co", "bob@bobs.test", "B0bs-secret").await;

    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;
    let created = create_invite(&app, &cookies, "bob@bobs.test", "member").await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    let invite_id = Uuid::parse_str(created.data()["id"].as_str().unwrap()).unwrap();
    assert_eq!(created.data()["status"], "pending");

    // The raw token travels by mail; tests read it from the database.
    let token = app.invite_token(invite_id).await;
    let validated = app
        .request(
            "GET",
            &format!("/api/account-invites/validate/{token}"),
            None,
            None,
        )
        .await;
    assert_eq!(validated.status, StatusCode::OK);
    assert_eq!(validated.data()["status"], "pending");

    let accepted = app
        .request(
            "POST",
            "/api/account-invites/accept",
            Some(serde_json::json!({
                "token": token,
                "password": "B0bs-secret",
                "first_name": "Bob",
                "last_name": "Builder",
            })),
            None,
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK, "{}", accepted.body);

    // Bob was reassigned into Acme at the invited role.
    assert_eq!(accepted.data()["role"], "member");
    assert_eq!(
        accepted.data()["account_id"].as_str().unwrap(),
        acme_account.to_string()
    );
    assert_eq!(app.invite_status(invite_id).await, "accepted");

    // Accepting twice fails.
    let again = app
        .request(
            "POST",
            "/api/account-invites/accept",
            Some(serde_json::json!({
                "token": token,
                "password": "B0bs-secret",
                "first_name": "Bob",
                "last_name": "Builder",
            })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn duplicate_active_invite_is_rejected() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    let first = create_invite(&app, &cookies, "new@hire.test", "member").await;
    assert_eq!(first.status, StatusCode::OK);

    let second = create_invite(&app, &cookies, "new@hire.test", "viewer").await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn unknown_role_is_rejected_at_the_boundary() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    let response = create_invite(&app, &cookies, "new@hire.test", "superuser").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn validate_flips_lapsed_invites_to_expired_idempotently() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    let created = create_invite(&app, &cookies, "slow@hire.test", "member").await;
    let invite_id = Uuid::parse_str(created.data()["id"].as_str().unwrap()).unwrap();
    let token = app.invite_token(invite_id).await;
    app.lapse_invite(invite_id).await;

    let first = app
        .request(
            "GET",
            &format!("/api/account-invites/validate/{token}"),
            None,
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.invite_status(invite_id).await, "expired");

    // Terminal behaviour is stable on repeat reads.
    let second = app
        .request(
            "GET",
            &format!("/api/account-invites/validate/{token}"),
            None,
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.invite_status(invite_id).await, "expired");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn resend_rejects_still_valid_and_reissues_lapsed_invites() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    let created = create_invite(&app, &cookies, "slow@hire.test", "member").await;
    let invite_id = Uuid::parse_str(created.data()["id"].as_str().unwrap()).unwrap();
    let original_token = app.invite_token(invite_id).await;

    let premature = app
        .request(
            "POST",
            &format!("/api/account-invites/{invite_id}/resend"),
            None,
            Some(&cookies),
        )
        .await;
    assert_eq!(premature.status, StatusCode::BAD_REQUEST);

    app.lapse_invite(invite_id).await;
    let resent = app
        .request(
            "POST",
            &format!("/api/account-invites/{invite_id}/resend"),
            None,
            Some(&cookies),
        )
        .await;
    assert_eq!(resent.status, StatusCode::OK, "{}", resent.body);
    assert_eq!(resent.data()["status"], "pending");
    assert_ne!(app.invite_token(invite_id).await, original_token);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn revoked_invites_cannot_be_accepted() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    let created = create_invite(&app, &cookies, "gone@hire.test", "member").await;
    let invite_id = Uuid::parse_str(created.data()["id"].as_str().unwrap()).unwrap();
    let token = app.invite_token(invite_id).await;

    let revoked = app
        .request(
            "DELETE",
            &format!("/api/account-invites/{invite_id}"),
            None,
            Some(&cookies),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);
    assert_eq!(app.invite_status(invite_id).await, "revoked");

    let accept = app
        .request(
            "POST",
            "/api/account-invites/accept",
            Some(serde_json::json!({
                "token": token,
                "password": "N3w-secret!",
                "first_name": "Gone",
                "last_name": "Hire",
            })),
            None,
        )
        .await;
    assert_eq!(accept.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn bulk_create_partitions_outcomes_without_aborting() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    // Seed one active invite so the bulk request has a guaranteed failure.
    let seeded = create_invite(&app, &cookies, "taken@hire.test", "member").await;
    assert_eq!(seeded.status, StatusCode::OK);

    let bulk = app
        .request(
            "POST",
            "/api/account-invites/bulk",
            Some(serde_json::json!({
                "invites": [
                    { "email": "fresh@hire.test", "role": "member" },
                    { "email": "taken@hire.test", "role": "member" },
                    { "email": "another@hire.test", "role": "viewer" },
                ]
            })),
            Some(&cookies),
        )
        .await;

    assert_eq!(bulk.status, StatusCode::OK, "{}", bulk.body);
    let successful = bulk.data()["successful"].as_array().unwrap();
    let failed = bulk.data()["failed"].as_array().unwrap();
    assert_eq!(successful.len(), 2);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0]["email"], "taken@hire.test");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn list_supports_pagination_and_filters() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    for i in 0..3 {
        let created = create_invite(&app, &cookies, &format!("hire{i}@acme.test"), "member").await;
        assert_eq!(created.status, StatusCode::OK);
    }

    let page = app
        .request(
            "GET",
            "/api/account-invites?page=1&limit=2",
            None,
            Some(&cookies),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.data()["items"].as_array().unwrap().len(), 2);
    assert_eq!(page.data()["total_items"], 3);

    let filtered = app
        .request(
            "GET",
            "/api/account-invites?email=hire1&status=pending",
            None,
            Some(&cookies),
        )
        .await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(filtered.data()["items"].as_array().unwrap().len(), 1);
}
