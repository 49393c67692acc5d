mod common;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use rstest::rstest;
use serde_json::json;

#[tokio::test]
async fn list_returns_items_in_id_order() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Widget", 120, 2.5, 20).await;
    app.add_item("Gadget", 8, 14.99, 10).await;

    let response = app
        .request(Method::GET, "/api/v1/inventory", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    let items = body["data"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["item_name"], "Widget");
    assert_eq!(items[1]["item_name"], "Gadget");
}

#[tokio::test]
async fn set_stock_only_touches_named_item() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Widget", 120, 2.5, 20).await;
    app.add_item("Gadget", 8, 14.99, 10).await;

    let response = app
        .request(
            Method::PUT,
            "/api/v1/inventory/Widget/stock",
            Some(json!({ "stock": 7 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["stock"], 7);
    assert_eq!(body["message"], "Stock for Widget updated to 7.");

    assert_eq!(app.stock_of("Widget").await, 7);
    assert_eq!(app.stock_of("Gadget").await, 8);
}

#[tokio::test]
async fn set_stock_rejects_negative_and_unknown_items() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Widget", 120, 2.5, 20).await;

    let response = app
        .request(
            Method::PUT,
            "/api/v1/inventory/Widget/stock",
            Some(json!({ "stock": -1 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.stock_of("Widget").await, 120);

    let response = app
        .request(
            Method::PUT,
            "/api/v1/inventory/Nope/stock",
            Some(json!({ "stock": 3 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(5, 10, true)]
#[case(10, 10, false)]
#[case(11, 10, false)]
#[tokio::test]
async fn low_stock_is_strictly_below_threshold(
    #[case] stock: i32,
    #[case] threshold: i32,
    #[case] expected_low: bool,
) {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Sprocket", stock, 0.75, threshold).await;

    let response = app
        .request(Method::GET, "/api/v1/inventory/low-stock", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let low = body["data"].as_array().expect("low stock list");
    assert_eq!(!low.is_empty(), expected_low);
}

#[tokio::test]
async fn status_carries_one_alert_per_low_item() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Widget", 120, 2.5, 20).await;
    app.add_item("Gadget", 8, 14.99, 10).await;

    let response = app
        .request(Method::GET, "/api/v1/inventory/status", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(2));
    let alerts = body["data"]["alerts"].as_array().expect("alerts");
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0],
        "Alert: Gadget stock is below the threshold! Current stock: 8, Threshold: 10"
    );
}

#[tokio::test]
async fn adjust_stock_never_goes_negative() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Gizmo", 30, 39.0, 5).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory/Gizmo/adjust",
            Some(json!({ "delta": -10 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.stock_of("Gizmo").await, 20);

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory/Gizmo/adjust",
            Some(json!({ "delta": -21 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.stock_of("Gizmo").await, 20);
}

#[tokio::test]
async fn create_item_and_reject_duplicates() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    let payload = json!({
        "item_name": "Flange",
        "stock": 12,
        "price": 3.25,
        "threshold": 4,
        "supplier_id": null
    });

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory",
            Some(payload.clone()),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Item Flange created.");
    assert_eq!(body["data"]["stock"], 12);

    let response = app
        .request(Method::POST, "/api/v1/inventory", Some(payload), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_item_with_unknown_supplier_is_a_bad_request() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory",
            Some(json!({
                "item_name": "Bracket",
                "stock": 1,
                "price": 1.0,
                "threshold": 0,
                "supplier_id": 999
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overflowing_adjustment_is_rejected_and_table_stays_readable() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Gizmo", 30, 39.0, 5).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory/Gizmo/adjust",
            Some(json!({ "delta": i32::MAX })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.stock_of("Gizmo").await, 30);

    let response = app
        .request(Method::GET, "/api/v1/inventory", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::POST,
            "/api/v1/inventory/Gizmo/adjust",
            Some(json!({ "delta": i32::MAX - 30 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.stock_of("Gizmo").await, i32::MAX);
}
