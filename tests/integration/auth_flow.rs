//! Signup → verify → login flow.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn signup_verify_login_me() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("alice@example.com", "password123", "Alice")
        .await;

    let response = app.request("GET", "/api/users/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "alice@example.com");
    assert_eq!(response.body["is_student_verified"], true);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn login_is_rejected_before_verification() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "email": "bob@example.com",
                "password": "password123",
                "name": "Bob",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "bob@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.create_verified_user("carol@example.com", "password123", "Carol")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "carol@example.com",
                "password": "wrong",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn duplicate_signup_conflicts() {
    let app = TestApp::new().await;
    app.create_verified_user("dave@example.com", "password123", "Dave")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "email": "dave@example.com",
                "password": "password456",
                "name": "Dave Again",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn requests_without_session_are_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/api/workspaces", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn logout_invalidates_the_session() {
    let app = TestApp::new().await;
    let cookie = app
        .create_verified_user("erin@example.com", "password123", "Erin")
        .await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/users/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
