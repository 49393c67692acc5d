use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::common::{created_response, message_response, success_response, validate_input};
use crate::auth::SessionContext;
use crate::errors::ServiceError;
use crate::handlers::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SupplierRequest {
    #[validate(length(min = 1, message = "Supplier name is required"))]
    pub supplier_name: String,
    #[validate(length(min = 1, message = "Contact info is required"))]
    pub contact_info: String,
}

pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list_suppliers).post(add_supplier))
        .route("/suppliers/:id", put(edit_supplier))
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    responses(
        (status = 200, description = "All suppliers", body = Vec<crate::entities::supplier::Model>),
        (status = 401, description = "Please login first.", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    _session: SessionContext,
) -> Result<impl IntoResponse, ServiceError> {
    let suppliers = state.services.suppliers.list_suppliers().await?;
    Ok(success_response(suppliers))
}

#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    request_body = SupplierRequest,
    responses(
        (status = 201, description = "Supplier added", body = crate::entities::supplier::Model),
        (status = 400, description = "Missing fields", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "suppliers"
)]
pub async fn add_supplier(
    State(state): State<AppState>,
    _session: SessionContext,
    Json(payload): Json<SupplierRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let supplier = state
        .services
        .suppliers
        .add_supplier(&payload.supplier_name, &payload.contact_info)
        .await?;
    Ok(created_response(supplier, "Supplier added successfully."))
}

#[utoipa::path(
    put,
    path = "/api/v1/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier id")),
    request_body = SupplierRequest,
    responses(
        (status = 200, description = "Supplier updated", body = crate::entities::supplier::Model),
        (status = 400, description = "Missing fields", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "suppliers"
)]
pub async fn edit_supplier(
    State(state): State<AppState>,
    _session: SessionContext,
    Path(id): Path<i32>,
    Json(payload): Json<SupplierRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let supplier = state
        .services
        .suppliers
        .edit_supplier(id, &payload.supplier_name, &payload.contact_info)
        .await?;
    Ok(message_response(supplier, "Supplier updated successfully."))
}
