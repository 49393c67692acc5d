#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::NaiveDateTime;
use oims::{
    auth::PasswordScheme,
    config::AppConfig,
    db,
    entities::{item, order, OrderStatus},
    repositories::{InventoryRepository, InventoryStore, NewItem},
    AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness for spinning up the application against a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    /// Fresh schema, no sample data, fast legacy hashing, default pool size.
    pub async fn new() -> Self {
        Self::with_scheme(PasswordScheme::Sha256).await
    }

    pub async fn with_scheme(scheme: PasswordScheme) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db_path = dir.path().join("oims_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.password_scheme = scheme.to_string();

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::init_schema(&pool, false, false)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = oims::app_router(state.clone());

        Self {
            router,
            state,
            _dir: dir,
        }
    }

    /// Sends a request through the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Registers `username` and returns a live session token.
    pub async fn login_as(&self, username: &str, password: &str) -> String {
        let credentials = json!({ "username": username, "password": password });
        let response = self
            .request(
                Method::POST,
                "/api/v1/auth/register",
                Some(credentials.clone()),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = self
            .request(Method::POST, "/api/v1/auth/login", Some(credentials), None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        body["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    pub async fn operator_token(&self) -> String {
        self.login_as("operator", "correct horse").await
    }

    fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.state.db.clone())
    }

    pub async fn add_item(&self, name: &str, stock: i32, price: f64, threshold: i32) -> item::Model {
        self.inventory()
            .insert_item(NewItem {
                item_name: name.to_string(),
                stock,
                price,
                threshold,
                supplier_id: None,
            })
            .await
            .expect("insert test item")
    }

    pub async fn stock_of(&self, name: &str) -> i32 {
        self.inventory()
            .find_by_name(name)
            .await
            .expect("query item")
            .expect("item exists")
            .stock
    }

    /// Inserts an order row directly, bypassing stock checks.
    pub async fn insert_order(&self, item_id: i32, quantity: i32, date: &str) -> order::Model {
        let order_date = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
            .expect("order date format");
        order::ActiveModel {
            item_id: Set(item_id),
            quantity: Set(quantity),
            order_date: Set(order_date),
            order_status: Set(OrderStatus::Pending),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("insert test order")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
