use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::debug;

use super::{BaseRepository, InventoryStore, Repository};
use crate::entities::item;
use crate::errors::ServiceError;

/// Fields of an item created at admin time.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub item_name: String,
    pub stock: i32,
    pub price: f64,
    pub threshold: i32,
    pub supplier_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn require(&self, item_name: &str) -> Result<item::Model, ServiceError> {
        self.find_by_name(item_name)
            .await?
            .ok_or_else(|| item_not_found(item_name))
    }
}

/// Stock after applying `delta`, or why the adjustment is refused.
fn adjusted_stock(item: &item::Model, delta: i32) -> Result<i32, ServiceError> {
    let target = item.stock.checked_add(delta).ok_or_else(|| {
        ServiceError::ValidationError(format!(
            "Adjusting {} by {} is out of range (current stock: {})",
            item.item_name, delta, item.stock
        ))
    })?;
    if target < 0 {
        return Err(ServiceError::NegativeStock(format!(
            "Adjusting {} by {} would leave negative stock (current stock: {})",
            item.item_name, delta, item.stock
        )));
    }
    Ok(target)
}

pub(crate) fn item_not_found(item_name: &str) -> ServiceError {
    ServiceError::NotFound(format!("Item {} not found", item_name))
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn list_items(&self) -> Result<Vec<item::Model>, ServiceError> {
        item::Entity::find()
            .order_by_asc(item::Column::ItemId)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::db_error)
    }

    async fn find_by_name(&self, item_name: &str) -> Result<Option<item::Model>, ServiceError> {
        item::Entity::find()
            .filter(item::Column::ItemName.eq(item_name))
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::db_error)
    }

    async fn set_stock(&self, item_name: &str, stock: i32) -> Result<item::Model, ServiceError> {
        let existing = self.require(item_name).await?;
        let mut active: item::ActiveModel = existing.into();
        active.stock = Set(stock);
        active
            .update(self.base.get_db())
            .await
            .map_err(ServiceError::db_error)
    }

    async fn adjust_stock(
        &self,
        item_name: &str,
        delta: i32,
    ) -> Result<item::Model, ServiceError> {
        let current = self.require(item_name).await?;
        adjusted_stock(&current, delta)?;

        // Guarded update: the result must stay within 0..=i32::MAX even if a
        // concurrent writer changed the row after the read above
        let delta_wide = i64::from(delta);
        let result = item::Entity::update_many()
            .col_expr(item::Column::Stock, Expr::col(item::Column::Stock).add(delta))
            .filter(item::Column::ItemId.eq(current.item_id))
            .filter(item::Column::Stock.gte(-delta_wide))
            .filter(item::Column::Stock.lte(i64::from(i32::MAX) - delta_wide))
            .exec(self.base.get_db())
            .await
            .map_err(ServiceError::db_error)?;

        let latest = self.require(item_name).await?;
        if result.rows_affected == 0 {
            debug!(item_name, delta, stock = latest.stock, "stock adjustment refused");
            adjusted_stock(&latest, delta)?;
            return Err(ServiceError::Conflict(format!(
                "Stock for {} changed during the adjustment",
                item_name
            )));
        }
        Ok(latest)
    }

    async fn insert_item(&self, new_item: NewItem) -> Result<item::Model, ServiceError> {
        let item_name = new_item.item_name.clone();
        item::ActiveModel {
            item_name: Set(new_item.item_name),
            stock: Set(new_item.stock),
            price: Set(new_item.price),
            threshold: Set(new_item.threshold),
            supplier_id: Set(new_item.supplier_id),
            ..Default::default()
        }
        .insert(self.base.get_db())
        .await
        .map_err(|e| match ServiceError::db_error(e) {
            ServiceError::Conflict(_) => {
                ServiceError::Conflict(format!("Item {} already exists", item_name))
            }
            other => other,
        })
    }
}
