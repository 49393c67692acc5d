use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{created_response, message_response, success_response, validate_input};
use crate::auth::SessionContext;
use crate::entities::OrderStatus;
use crate::errors::ServiceError;
use crate::handlers::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub item_name: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrackOrdersQuery {
    /// Restrict the listing to a single order
    pub order_id: Option<i32>,
}

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(track_orders).post(place_order))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", put(update_order_status))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed with status Pending", body = crate::repositories::OrderView),
        (status = 400, description = "Quantity must be at least 1", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Not enough stock", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    _session: SessionContext,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let order = state
        .services
        .orders
        .place_order(&payload.item_name, payload.quantity)
        .await?;
    let message = format!("Order placed for {} of {}.", order.quantity, order.item_name);
    Ok(created_response(order, message))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(TrackOrdersQuery),
    responses(
        (status = 200, description = "Orders joined with item names", body = Vec<crate::repositories::OrderView>),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn track_orders(
    State(state): State<AppState>,
    _session: SessionContext,
    Query(query): Query<TrackOrdersQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.orders.track_orders(query.order_id).await?;
    Ok(success_response(orders))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = crate::repositories::OrderView),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    _session: SessionContext,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.find_order(id).await?;
    Ok(success_response(order))
}

#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}/status",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = crate::repositories::OrderView),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    _session: SessionContext,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state
        .services
        .orders
        .update_order_status(id, payload.status)
        .await?;
    let message = format!("Order {} is now {}.", order.order_id, order.order_status);
    Ok(message_response(order, message))
}
