//! Integration tests for the account-role and project-role guards.

mod helpers;

use axum::http::StatusCode;
use taskhub_entity::user::AccountRole;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn invite_endpoints_enforce_the_declared_account_roles() {
    let app = helpers::TestApp::new().await;
    let owner_id = app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let account_id = app.account_of(owner_id).await;

    app.create_user("pm@acme.test", "Pm-secret1", AccountRole::ProjectManager, account_id)
        .await;
    app.create_user("member@acme.test", "Mem-secret1", AccountRole::Member, account_id)
        .await;
    app.create_user("viewer@acme.test", "View-secret1", AccountRole::Viewer, account_id)
        .await;

    let body = serde_json::json!({ "email": "x@hire.test", "role": "member" });

    for (email, password, expected) in [
        ("owner@acme.test", "Sup3r-secret", StatusCode::OK),
        ("pm@acme.test", "Pm-secret1", StatusCode::BAD_REQUEST), // duplicate invite, but admitted
        ("member@acme.test", "Mem-secret1", StatusCode::FORBIDDEN),
        ("viewer@acme.test", "View-secret1", StatusCode::FORBIDDEN),
    ] {
        let cookies = app.login(email, password).await;
        let response = app
            .request(
                "POST",
                "/api/account-invites/invite",
                Some(body.clone()),
                Some(&cookies),
            )
            .await;
        assert_eq!(response.status, expected, "role of {email}");
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn invite_endpoints_reject_unauthenticated_callers() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/account-invites", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn project_guard_requires_membership_beyond_account_role() {
    let app = helpers::TestApp::new().await;
    let owner_id = app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let account_id = app.account_of(owner_id).await;

    let outsider_id = app
        .create_user("outsider@acme.test", "Out-secret1", AccountRole::Member, account_id)
        .await;

    // The creator is auto-added as project owner.
    let owner_cookies = app.login("owner@acme.test", "Sup3r-secret").await;
    let created = app
        .request(
            "POST",
            "/api/projects",
            Some(serde_json::json!({ "name": "Apollo" })),
            Some(&owner_cookies),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    let project_id = Uuid::parse_str(created.data()["id"].as_str().unwrap()).unwrap();

    // Admitted by account role, rejected for missing membership.
    let outsider_cookies = app.login("outsider@acme.test", "Out-secret1").await;
    let denied = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/members"),
            None,
            Some(&outsider_cookies),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    // The project owner manages members freely.
    let added = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/members"),
            Some(serde_json::json!({ "user_id": outsider_id, "role": "member" })),
            Some(&owner_cookies),
        )
        .await;
    assert_eq!(added.status, StatusCode::OK, "{}", added.body);

    // Membership admits the former outsider to the read endpoint,
    let listed = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/members"),
            None,
            Some(&outsider_cookies),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data().as_array().unwrap().len(), 2);

    // but a plain member still cannot mutate the roster.
    let mutate = app
        .request(
            "DELETE",
            &format!("/api/projects/{project_id}/members/{owner_id}"),
            None,
            Some(&outsider_cookies),
        )
        .await;
    assert_eq!(mutate.status, StatusCode::FORBIDDEN);
}
