use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::{item, supplier, user, OrderStatus};
use crate::errors::ServiceError;

pub mod inventory_repository;
pub mod order_repository;
pub mod supplier_repository;
pub mod user_repository;

pub use inventory_repository::{InventoryRepository, NewItem};
pub use order_repository::{OrderRepository, OrderView, SalesLine};
pub use supplier_repository::SupplierRepository;
pub use user_repository::UserRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<user::Model, ServiceError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError>;
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All items ordered by id.
    async fn list_items(&self) -> Result<Vec<item::Model>, ServiceError>;

    async fn find_by_name(&self, item_name: &str) -> Result<Option<item::Model>, ServiceError>;

    /// Overwrites the stock of the named item.
    async fn set_stock(&self, item_name: &str, stock: i32) -> Result<item::Model, ServiceError>;

    /// Applies a relative change; refuses any change that would leave stock negative.
    async fn adjust_stock(&self, item_name: &str, delta: i32)
        -> Result<item::Model, ServiceError>;

    async fn insert_item(&self, new_item: NewItem) -> Result<item::Model, ServiceError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Checks stock, records a `Pending` order and decrements stock as one unit of work.
    async fn place_order(&self, item_name: &str, quantity: i32)
        -> Result<OrderView, ServiceError>;

    async fn list_orders(&self, order_id: Option<i32>) -> Result<Vec<OrderView>, ServiceError>;

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<OrderView, ServiceError>;

    /// Order lines joined with their item's price, optionally restricted to one item.
    async fn sales_lines(&self, item_name: Option<&str>) -> Result<Vec<SalesLine>, ServiceError>;
}

#[async_trait]
pub trait SupplierStore: Send + Sync {
    async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError>;

    async fn insert_supplier(
        &self,
        supplier_name: &str,
        contact_info: &str,
    ) -> Result<supplier::Model, ServiceError>;

    async fn update_supplier(
        &self,
        supplier_id: i32,
        supplier_name: &str,
        contact_info: &str,
    ) -> Result<supplier::Model, ServiceError>;
}
