use axum::{response::IntoResponse, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use super::common::success_response;
use crate::auth::SessionContext;
use crate::handlers::AppState;

/// Functions offered once logged in, in display order.
pub const DASHBOARD_FUNCTIONS: [&str; 6] = [
    "Current Stock Status",
    "Update Inventory",
    "Place Order",
    "Track Orders",
    "Manage Suppliers",
    "Sales Reports",
];

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardInfo {
    pub username: String,
    pub functions: Vec<String>,
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard functions", body = DashboardInfo),
        (status = 401, description = "Please login first.", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "dashboard"
)]
pub async fn dashboard(session: SessionContext) -> impl IntoResponse {
    success_response(DashboardInfo {
        username: session.username,
        functions: DASHBOARD_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
    })
}
