pub mod auth;
pub mod common;
pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod reports;
pub mod suppliers;

use std::sync::Arc;

use crate::auth::PasswordScheme;
use crate::db::DbPool;
use crate::repositories::{
    InventoryRepository, InventoryStore, OrderRepository, OrderStore, SupplierRepository,
    UserRepository,
};
use crate::services::{
    AuthService, InventoryService, OrderService, ReportService, SupplierService,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers and the CLI
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub inventory: Arc<InventoryService>,
    pub orders: Arc<OrderService>,
    pub suppliers: Arc<SupplierService>,
    pub reports: Arc<ReportService>,
}

impl AppServices {
    /// Wires every service to its SeaORM-backed store.
    pub fn new(db_pool: Arc<DbPool>, password_scheme: PasswordScheme) -> Self {
        let inventory_store: Arc<dyn InventoryStore> =
            Arc::new(InventoryRepository::new(db_pool.clone()));
        let order_store: Arc<dyn OrderStore> = Arc::new(OrderRepository::new(db_pool.clone()));

        Self {
            auth: Arc::new(AuthService::new(
                Arc::new(UserRepository::new(db_pool.clone())),
                password_scheme,
            )),
            inventory: Arc::new(InventoryService::new(inventory_store.clone())),
            orders: Arc::new(OrderService::new(order_store.clone())),
            suppliers: Arc::new(SupplierService::new(Arc::new(SupplierRepository::new(
                db_pool,
            )))),
            reports: Arc::new(ReportService::new(order_store, inventory_store)),
        }
    }
}
