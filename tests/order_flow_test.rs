mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use chrono::NaiveDateTime;
use common::{response_json, TestApp};
use oims::errors::ServiceError;
use serde_json::json;

#[tokio::test]
async fn placing_an_order_decrements_stock_and_records_pending() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Widget", 10, 2.5, 2).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({ "item_name": "Widget", "quantity": 4 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Order placed for 4 of Widget.");
    assert_eq!(body["data"]["order_status"], "Pending");
    assert_eq!(body["data"]["item_name"], "Widget");
    let order_date = body["data"]["order_date"].as_str().expect("order date");
    NaiveDateTime::parse_from_str(order_date, "%Y-%m-%d %H:%M:%S").expect("date format");

    assert_eq!(app.stock_of("Widget").await, 6);

    let response = app
        .request(Method::GET, "/api/v1/orders", None, Some(&token))
        .await;
    let body = response_json(response).await;
    let orders = body["data"].as_array().expect("orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["quantity"], 4);
}

#[tokio::test]
async fn ordering_exactly_the_remaining_stock_succeeds() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Gadget", 3, 14.99, 1).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({ "item_name": "Gadget", "quantity": 3 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.stock_of("Gadget").await, 0);
}

#[tokio::test]
async fn insufficient_stock_leaves_no_trace() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Widget", 3, 2.5, 2).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({ "item_name": "Widget", "quantity": 5 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(
        body["message"],
        "Insufficient stock: Not enough stock for Widget. Only 3 available."
    );

    assert_eq!(app.stock_of("Widget").await, 3);
    let orders = app
        .state
        .services
        .orders
        .track_orders(None)
        .await
        .expect("list orders");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn unknown_item_and_bad_quantity_are_rejected() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Widget", 3, 2.5, 2).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({ "item_name": "Doohickey", "quantity": 1 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({ "item_name": "Widget", "quantity": 0 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.stock_of("Widget").await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_orders_never_oversell() {
    let app = TestApp::new().await;
    assert!(app.state.config.db_max_connections > 1);
    app.add_item("Gadget", 8, 14.99, 10).await;

    let orders = app.state.services.orders.clone();
    let mut handles = Vec::new();
    for _ in 0..16 {
        let orders = orders.clone();
        handles.push(tokio::spawn(async move {
            orders.place_order("Gadget", 1).await
        }));
    }

    let mut placed = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.expect("task join") {
            Ok(_) => placed += 1,
            Err(err) => {
                assert_matches!(err, ServiceError::InsufficientStock(_));
                refused += 1;
            }
        }
    }

    assert_eq!(placed, 8);
    assert_eq!(refused, 8);
    assert_eq!(app.stock_of("Gadget").await, 0);
    let recorded = app
        .state
        .services
        .orders
        .track_orders(None)
        .await
        .expect("list orders");
    assert_eq!(recorded.len(), 8);
}

#[tokio::test]
async fn refused_order_after_stock_runs_out_reports_remaining_stock() {
    let app = TestApp::new().await;
    app.add_item("Widget", 2, 2.5, 1).await;
    let orders = &app.state.services.orders;

    orders.place_order("Widget", 2).await.expect("first order");
    let err = orders.place_order("Widget", 1).await.unwrap_err();
    assert_matches!(
        err,
        ServiceError::InsufficientStock(msg) if msg == "Not enough stock for Widget. Only 0 available."
    );
    assert_eq!(app.stock_of("Widget").await, 0);
}

#[tokio::test]
async fn track_single_order_and_update_status() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;
    app.add_item("Gizmo", 30, 39.0, 5).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({ "item_name": "Gizmo", "quantity": 2 })),
            Some(&token),
        )
        .await;
    let body = response_json(response).await;
    let order_id = body["data"]["order_id"].as_i64().expect("order id");

    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/orders/{order_id}/status"),
            Some(json!({ "status": "In Transit" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/orders?order_id={order_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"][0]["order_status"], "In Transit");

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/orders/{order_id}"),
            None,
            Some(&token),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["item_name"], "Gizmo");
}

#[tokio::test]
async fn unknown_orders_are_not_found() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;

    for uri in ["/api/v1/orders?order_id=42", "/api/v1/orders/42"] {
        let response = app.request(Method::GET, uri, None, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    let response = app
        .request(
            Method::PUT,
            "/api/v1/orders/42/status",
            Some(json!({ "status": "Shipped" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let app = TestApp::new().await;
    let token = app.operator_token().await;

    let response = app
        .request(
            Method::PUT,
            "/api/v1/orders/1/status",
            Some(json!({ "status": "Lost" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
