mod common;

use axum::http::{Method, StatusCode};
use common::build_test_app;
use serde_json::json;

#[tokio::test]
async fn login_and_access_protected_route() {
    let app = build_test_app(&[]);

    let (status, body) = app.request(Method::GET, "/api/v1/assets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let token = app.register_and_login("alice").await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert!(body.get("passwordHash").is_none());

    let (status, body) = app
        .request(Method::GET, "/api/v1/assets", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn wrong_password_and_bad_tokens_are_rejected() {
    let app = build_test_app(&[]);
    app.register_and_login("bob").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "bob", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    let (status, _) = app
        .request(Method::GET, "/api/v1/auth/me", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = build_test_app(&[]);
    app.register_and_login("carol").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "CAROL",
                "email": "someone@example.com",
                "password": "hunter22",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "username": "dave", "email": "not-an-email", "password": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_the_account_revokes_its_token() {
    let app = build_test_app(&[]);
    let token = app.register_and_login("erin").await;

    let (status, _) = app
        .request(Method::DELETE, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
