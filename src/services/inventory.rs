use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::entities::item;
use crate::errors::ServiceError;
use crate::repositories::{InventoryStore, NewItem};

/// Current stock levels with one alert line per item below its threshold.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockStatus {
    pub items: Vec<item::Model>,
    pub alerts: Vec<String>,
}

/// Items whose stock is strictly below their threshold. Equality is not low.
pub fn low_stock(items: &[item::Model]) -> Vec<item::Model> {
    items.iter().filter(|i| i.is_low_stock()).cloned().collect()
}

pub fn stock_alert(item: &item::Model) -> String {
    format!(
        "Alert: {} stock is below the threshold! Current stock: {}, Threshold: {}",
        item.item_name, item.stock, item.threshold
    )
}

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list_inventory(&self) -> Result<Vec<item::Model>, ServiceError> {
        self.store.list_items().await
    }

    #[instrument(skip(self))]
    pub async fn set_stock(
        &self,
        item_name: &str,
        new_stock: i32,
    ) -> Result<item::Model, ServiceError> {
        if new_stock < 0 {
            return Err(ServiceError::ValidationError(
                "Stock quantity cannot be negative".into(),
            ));
        }
        let updated = self.store.set_stock(item_name, new_stock).await?;
        info!(item_name, stock = updated.stock, "stock updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn adjust_stock(
        &self,
        item_name: &str,
        delta: i32,
    ) -> Result<item::Model, ServiceError> {
        let updated = self.store.adjust_stock(item_name, delta).await?;
        info!(item_name, delta, stock = updated.stock, "stock adjusted");
        Ok(updated)
    }

    #[instrument(skip(self), fields(item_name = %new_item.item_name))]
    pub async fn create_item(&self, mut new_item: NewItem) -> Result<item::Model, ServiceError> {
        new_item.item_name = new_item.item_name.trim().to_string();
        if new_item.item_name.is_empty() {
            return Err(ServiceError::ValidationError("Item name is required".into()));
        }
        if new_item.stock < 0 || new_item.threshold < 0 {
            return Err(ServiceError::ValidationError(
                "Stock and threshold cannot be negative".into(),
            ));
        }
        if !new_item.price.is_finite() || new_item.price < 0.0 {
            return Err(ServiceError::ValidationError(
                "Price must be a non-negative number".into(),
            ));
        }
        self.store.insert_item(new_item).await
    }

    #[instrument(skip(self))]
    pub async fn low_stock(&self) -> Result<Vec<item::Model>, ServiceError> {
        let items = self.store.list_items().await?;
        Ok(low_stock(&items))
    }

    /// Recomputed on every call; alerts are never stored.
    #[instrument(skip(self))]
    pub async fn stock_status(&self) -> Result<StockStatus, ServiceError> {
        let items = self.store.list_items().await?;
        let alerts: Vec<String> = items
            .iter()
            .filter(|i| i.is_low_stock())
            .map(stock_alert)
            .collect();
        for alert in &alerts {
            warn!("{}", alert);
        }
        Ok(StockStatus { items, alerts })
    }
}
