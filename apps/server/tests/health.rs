mod common;

use axum::http::{Method, StatusCode};
use common::build_test_app;

#[tokio::test]
async fn healthz_works() {
    let app = build_test_app(&[]);
    let (status, body) = app.request(Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn readyz_checks_the_database() {
    let app = build_test_app(&[]);
    let (status, _) = app.request(Method::GET, "/api/v1/readyz", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
