//! Integration tests for the invite expiry sweeper.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn sweep_expires_only_overdue_pending_invites() {
    let app = helpers::TestApp::new().await;
    app.register_account("Acme", "owner@acme.test", "Sup3r-secret").await;
    let cookies = app.login("owner@acme.test", "Sup3r-secret").await;

    let mut ids = Vec::new();
    for email in ["a@hire.test", "b@hire.test", "c@hire.test"] {
        let created = app
            .request(
                "POST",
                "/api/account-invites/invite",
                Some(serde_json::json!({ "email": email, "role": "member" })),
                Some(&cookies),
            )
            .await;
        assert_eq!(created.status, StatusCode::OK);
        ids.push(Uuid::parse_str(created.data()["id"].as_str().unwrap()).unwrap());
    }

    // Two overdue, one still in the future.
    app.lapse_invite(ids[0]).await;
    app.lapse_invite(ids[1]).await;

    let swept = app.invite_service.cleanup_expired().await.unwrap();
    assert_eq!(swept, 2);

    assert_eq!(app.invite_status(ids[0]).await, "expired");
    assert_eq!(app.invite_status(ids[1]).await, "expired");
    assert_eq!(app.invite_status(ids[2]).await, "pending");

    // Re-running the sweep is a no-op.
    let again = app.invite_service.cleanup_expired().await.unwrap();
    assert_eq!(again, 0);
}
