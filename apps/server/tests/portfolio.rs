mod common;

use axum::http::{Method, StatusCode};
use common::build_test_app;
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn performance_and_realized_gains_flow() {
    let app = build_test_app(&[("AAPL", dec!(150))]);
    let token = app.register_and_login("alice").await;

    let (status, asset) = app
        .request(
            Method::POST,
            "/api/v1/assets",
            Some(&token),
            Some(json!({ "symbol": "aapl", "name": "Apple Inc." })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(asset["symbol"], "AAPL");
    assert_eq!(asset["assetType"], "STOCK");
    let asset_id = asset["id"].as_str().unwrap().to_string();

    for (kind, qty, price, date) in [
        ("BUY", "10", "100", "2024-01-01"),
        ("BUY", "10", "120", "2024-02-01"),
        ("SELL", "15", "130", "2024-03-01"),
    ] {
        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/transactions",
                Some(&token),
                Some(json!({
                    "assetId": asset_id,
                    "transactionType": kind,
                    "quantity": qty,
                    "pricePerUnit": price,
                    "transactionDate": date,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, perf) = app
        .request(Method::GET, "/api/v1/portfolio/performance", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let aapl = &perf["positions"]["AAPL"];
    assert_eq!(aapl["quantity"], json!(5.0));
    assert_eq!(aapl["totalCostBasis"], json!(600.0));
    assert_eq!(aapl["marketValue"], json!(750.0));
    assert_eq!(aapl["unrealizedPnlPercent"], json!(25.0));
    assert_eq!(perf["totalRealizedPnl"], json!(350.0));

    let (status, report) = app
        .request(
            Method::GET,
            "/api/v1/portfolio/realized-gains?startDate=2024-03-01&endDate=2024-03-31",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["gains"].as_array().unwrap().len(), 1);

    let (status, report) = app
        .request(
            Method::GET,
            "/api/v1/portfolio/realized-gains?startDate=2024-04-01",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["gains"], json!([]));

    let (status, _) = app
        .request(
            Method::GET,
            "/api/v1/portfolio/realized-gains?startDate=2024-05-01&endDate=2024-01-01",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transactions_are_scoped_to_their_owner() {
    let app = build_test_app(&[]);
    let alice = app.register_and_login("alice").await;
    let mallory = app.register_and_login("mallory").await;

    let (_, asset) = app
        .request(
            Method::POST,
            "/api/v1/assets",
            Some(&alice),
            Some(json!({ "symbol": "VOO", "assetType": "ETF" })),
        )
        .await;
    let asset_id = asset["id"].as_str().unwrap().to_string();

    let (status, tx) = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(&alice),
            Some(json!({
                "assetId": asset_id,
                "transactionType": "buy",
                "quantity": 2,
                "pricePerUnit": 400.5,
                "fees": "1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let tx_id = tx["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/transactions/{tx_id}");
    let (status, _) = app.request(Method::GET, &uri, Some(&mallory), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .request(Method::PUT, &uri, Some(&mallory), Some(json!({ "quantity": "3" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.request(Method::DELETE, &uri, Some(&mallory), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = app
        .request(Method::PUT, &uri, Some(&alice), Some(json!({ "quantity": "3" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], json!(3.0));

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/transactions",
            Some(&alice),
            Some(json!({
                "assetId": asset_id,
                "transactionType": "BUY",
                "quantity": "-1",
                "pricePerUnit": "1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, listed) = app
        .request(
            Method::GET,
            &format!("/api/v1/assets/{asset_id}/transactions"),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/v1/assets/{asset_id}"), Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.request(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
