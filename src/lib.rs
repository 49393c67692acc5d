//! OIMS: order and inventory management service
//!
//! Stock levels, order placement and tracking, a supplier directory and sales
//! reports over a local SQLite store, served as a JSON API behind a simple
//! login gate.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{
    extract::{FromRef, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use http::HeaderValue;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::ToSchema;

use crate::auth::SessionStore;
use crate::handlers::AppServices;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub sessions: SessionStore,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = AppServices::new(db.clone(), config.password_scheme());
        Self {
            db,
            config,
            sessions: SessionStore::new(),
            services,
        }
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}


/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Everything under `/api/v1`.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Status endpoint
        .route("/status", get(api_status))
        .nest("/auth", handlers::auth::auth_routes())
        .merge(handlers::dashboard::dashboard_routes())
        .merge(handlers::inventory::inventory_routes())
        .merge(handlers::orders::order_routes())
        .merge(handlers::suppliers::supplier_routes())
        .merge(handlers::reports::report_routes())
}

/// Full application router with tracing, CORS and request-id layers applied.
pub fn app_router(state: AppState) -> Router {
    let cors_layer = if state.config.should_allow_permissive_cors() {
        CorsLayer::permissive()
    } else {
        let origin = format!("http://{}:{}", state.config.host, state.config.port);
        match HeaderValue::from_str(&origin) {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => CorsLayer::new(),
        }
    };

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::openapi_routes())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors_layer)
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}

#[derive(Serialize, ToSchema)]
pub struct HomeInfo {
    pub service: String,
    pub version: String,
    /// Top-level navigation entries
    pub pages: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StatusInfo {
    pub status: String,
    pub service: String,
    pub version: String,
    pub git: String,
    pub build_time: String,
    pub environment: String,
    pub timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthInfo {
    pub status: String,
    pub database: String,
    pub timestamp: String,
}

async fn home() -> ApiResult<HomeInfo> {
    Ok(Json(ApiResponse::success(HomeInfo {
        service: "Inventory Management System".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pages: ["Home", "Login", "Register", "Dashboard"]
            .iter()
            .map(|p| p.to_string())
            .collect(),
    })))
}

async fn api_status(State(state): State<AppState>) -> ApiResult<StatusInfo> {
    Ok(Json(ApiResponse::success(StatusInfo {
        status: "ok".to_string(),
        service: "oims".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
        environment: state.config.environment.clone(),
        timestamp: Utc::now().to_rfc3339(),
    })))
}

async fn health_check(State(state): State<AppState>) -> ApiResult<HealthInfo> {
    let database = match db::check_connection(&state.db).await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Ok(Json(ApiResponse::success(HealthInfo {
        status: database.to_string(),
        database: database.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })))
}
