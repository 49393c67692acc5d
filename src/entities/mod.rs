pub mod item;
pub mod order;
pub mod supplier;
pub mod user;

pub use order::OrderStatus;
