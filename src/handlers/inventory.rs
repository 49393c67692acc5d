use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::common::{created_response, message_response, success_response, validate_input};
use crate::auth::SessionContext;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::repositories::NewItem;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub item_name: String,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Threshold cannot be negative"))]
    pub threshold: i32,
    pub supplier_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetStockRequest {
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    /// Positive to receive stock, negative to remove it
    pub delta: i32,
}

pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(list_inventory).post(create_item))
        .route("/inventory/status", get(stock_status))
        .route("/inventory/low-stock", get(low_stock))
        .route("/inventory/:name/stock", put(set_stock))
        .route("/inventory/:name/adjust", post(adjust_stock))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    responses(
        (status = 200, description = "All items ordered by id", body = Vec<crate::entities::item::Model>),
        (status = 401, description = "Please login first.", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    _session: SessionContext,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.inventory.list_inventory().await?;
    Ok(success_response(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = crate::entities::item::Model),
        (status = 400, description = "Invalid item", body = crate::errors::ErrorResponse),
        (status = 409, description = "Item name already exists", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "inventory"
)]
pub async fn create_item(
    State(state): State<AppState>,
    _session: SessionContext,
    Json(payload): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let item = state
        .services
        .inventory
        .create_item(NewItem {
            item_name: payload.item_name,
            stock: payload.stock,
            price: payload.price,
            threshold: payload.threshold,
            supplier_id: payload.supplier_id,
        })
        .await?;
    let message = format!("Item {} created.", item.item_name);
    Ok(created_response(item, message))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/status",
    responses(
        (status = 200, description = "Stock levels with low-stock alerts", body = crate::services::inventory::StockStatus),
        (status = 401, description = "Please login first.", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "inventory"
)]
pub async fn stock_status(
    State(state): State<AppState>,
    _session: SessionContext,
) -> Result<impl IntoResponse, ServiceError> {
    let status = state.services.inventory.stock_status().await?;
    Ok(success_response(status))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/low-stock",
    responses(
        (status = 200, description = "Items with stock strictly below threshold", body = Vec<crate::entities::item::Model>),
        (status = 401, description = "Please login first.", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "inventory"
)]
pub async fn low_stock(
    State(state): State<AppState>,
    _session: SessionContext,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.inventory.low_stock().await?;
    Ok(success_response(items))
}

#[utoipa::path(
    put,
    path = "/api/v1/inventory/{name}/stock",
    params(("name" = String, Path, description = "Item name")),
    request_body = SetStockRequest,
    responses(
        (status = 200, description = "Stock overwritten", body = crate::entities::item::Model),
        (status = 400, description = "Negative stock", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "inventory"
)]
pub async fn set_stock(
    State(state): State<AppState>,
    _session: SessionContext,
    Path(name): Path<String>,
    Json(payload): Json<SetStockRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let item = state
        .services
        .inventory
        .set_stock(&name, payload.stock)
        .await?;
    let message = format!("Stock for {} updated to {}.", item.item_name, item.stock);
    Ok(message_response(item, message))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/{name}/adjust",
    params(("name" = String, Path, description = "Item name")),
    request_body = AdjustStockRequest,
    responses(
        (status = 200, description = "Stock adjusted", body = crate::entities::item::Model),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Would leave negative stock", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "inventory"
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    _session: SessionContext,
    Path(name): Path<String>,
    Json(payload): Json<AdjustStockRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state
        .services
        .inventory
        .adjust_stock(&name, payload.delta)
        .await?;
    let message = format!("Stock for {} is now {}.", item.item_name, item.stock);
    Ok(message_response(item, message))
}
