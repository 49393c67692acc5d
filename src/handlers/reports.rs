use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::common::success_response;
use crate::auth::SessionContext;
use crate::errors::ServiceError;
use crate::handlers::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthlySalesQuery {
    /// Item name
    pub item: String,
    /// Month of year, "5" or "05"
    pub month: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SalesTrendQuery {
    /// Restrict the trend to one item
    pub item: Option<String>,
}

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports/monthly-sales", get(monthly_sales))
        .route("/reports/sales-trend", get(sales_trend))
        .route("/reports/inventory-levels", get(inventory_levels))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly-sales",
    params(MonthlySalesQuery),
    responses(
        (status = 200, description = "Matching orders with totals", body = crate::services::reports::MonthlySalesReport),
        (status = 400, description = "Month outside 1-12", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "reports"
)]
pub async fn monthly_sales(
    State(state): State<AppState>,
    _session: SessionContext,
    Query(query): Query<MonthlySalesQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state
        .services
        .reports
        .monthly_sales(&query.item, &query.month)
        .await?;
    Ok(success_response(report))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/sales-trend",
    params(SalesTrendQuery),
    responses(
        (status = 200, description = "Quantity and sales per calendar month", body = Vec<crate::services::reports::MonthlyTotal>),
    ),
    security(("Bearer" = [])),
    tag = "reports"
)]
pub async fn sales_trend(
    State(state): State<AppState>,
    _session: SessionContext,
    Query(query): Query<SalesTrendQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let trend = state
        .services
        .reports
        .sales_trend(query.item.as_deref())
        .await?;
    Ok(success_response(trend))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/inventory-levels",
    responses(
        (status = 200, description = "Stock and threshold per item", body = Vec<crate::services::reports::StockLevel>),
    ),
    security(("Bearer" = [])),
    tag = "reports"
)]
pub async fn inventory_levels(
    State(state): State<AppState>,
    _session: SessionContext,
) -> Result<impl IntoResponse, ServiceError> {
    let levels = state.services.reports.inventory_levels().await?;
    Ok(success_response(levels))
}
