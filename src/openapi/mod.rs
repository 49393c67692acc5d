use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OIMS API",
        version = "0.1.0",
        description = r#"
# Order & Inventory Management Service

Stock levels, order placement and tracking, suppliers and sales reports for a
single operator over a local SQLite store.

## Authentication

Register, then log in to receive a session token. Every dashboard endpoint
expects it in the Authorization header:

```
Authorization: Bearer <token>
```

Sessions last until `POST /api/v1/auth/logout`.

## Error Handling

```json
{
  "error": "Unprocessable Entity",
  "message": "Insufficient stock: Not enough stock for Widget. Only 3 available.",
  "request_id": "5f0c...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
"#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "auth", description = "Registration and sessions"),
        (name = "dashboard", description = "Dashboard navigation"),
        (name = "inventory", description = "Stock levels and low-stock alerts"),
        (name = "orders", description = "Order placement and tracking"),
        (name = "suppliers", description = "Supplier directory"),
        (name = "reports", description = "Sales and stock reports")
    ),
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::auth::current_session,
        crate::handlers::dashboard::dashboard,
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::create_item,
        crate::handlers::inventory::stock_status,
        crate::handlers::inventory::low_stock,
        crate::handlers::inventory::set_stock,
        crate::handlers::inventory::adjust_stock,
        crate::handlers::orders::place_order,
        crate::handlers::orders::track_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::update_order_status,
        crate::handlers::suppliers::list_suppliers,
        crate::handlers::suppliers::add_supplier,
        crate::handlers::suppliers::edit_supplier,
        crate::handlers::reports::monthly_sales,
        crate::handlers::reports::sales_trend,
        crate::handlers::reports::inventory_levels,
    ),
    components(
        schemas(
            crate::ApiResponse<serde_json::Value>,
            crate::entities::item::Model,
            crate::entities::supplier::Model,
            crate::entities::OrderStatus,
            crate::repositories::OrderView,
            crate::services::inventory::StockStatus,
            crate::services::reports::MonthlySalesReport,
            crate::services::reports::SalesRow,
            crate::services::reports::MonthlyTotal,
            crate::services::reports::StockLevel,
            crate::handlers::auth::CredentialsRequest,
            crate::handlers::auth::LoginResponse,
            crate::handlers::auth::SessionInfo,
            crate::handlers::inventory::CreateItemRequest,
            crate::handlers::inventory::SetStockRequest,
            crate::handlers::inventory::AdjustStockRequest,
            crate::handlers::orders::PlaceOrderRequest,
            crate::handlers::orders::UpdateOrderStatusRequest,
            crate::handlers::suppliers::SupplierRequest,
            crate::errors::ErrorResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDocV1;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Serves the generated document at `/api-docs/openapi.json`.
pub fn openapi_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDocV1::openapi()) }),
    )
}
