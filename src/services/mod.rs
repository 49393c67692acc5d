pub mod auth;
pub mod inventory;
pub mod orders;
pub mod reports;
pub mod suppliers;

pub use auth::AuthService;
pub use inventory::InventoryService;
pub use orders::OrderService;
pub use reports::ReportService;
pub use suppliers::SupplierService;
