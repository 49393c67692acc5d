use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, SubsecRound};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::inventory_repository::item_not_found;
use super::{BaseRepository, OrderStore, Repository};
use crate::entities::{item, order, OrderStatus};
use crate::errors::ServiceError;

pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An order joined with the name of the item it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderView {
    pub order_id: i32,
    pub item_name: String,
    pub quantity: i32,
    /// `YYYY-MM-DD HH:MM:SS`
    #[schema(example = "2024-05-09 14:03:27")]
    pub order_date: String,
    pub order_status: OrderStatus,
}

impl OrderView {
    fn from_parts(order: order::Model, item: Option<item::Model>) -> Self {
        Self {
            order_id: order.order_id,
            item_name: item.map(|i| i.item_name).unwrap_or_default(),
            quantity: order.quantity,
            order_date: order.order_date.format(ORDER_DATE_FORMAT).to_string(),
            order_status: order.order_status,
        }
    }
}

/// One order line priced at its item's current price.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesLine {
    pub order_id: i32,
    pub item_name: String,
    pub quantity: i32,
    pub price: f64,
    pub order_date: NaiveDateTime,
}

pub(crate) fn insufficient_stock(item_name: &str, stock: i32) -> ServiceError {
    ServiceError::InsufficientStock(format!(
        "Not enough stock for {}. Only {} available.",
        item_name, stock
    ))
}

#[derive(Debug, Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_item<C: ConnectionTrait>(
        &self,
        conn: &C,
        item_name: &str,
    ) -> Result<item::Model, ServiceError> {
        item::Entity::find()
            .filter(item::Column::ItemName.eq(item_name))
            .one(conn)
            .await?
            .ok_or_else(|| item_not_found(item_name))
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn place_order(
        &self,
        item_name: &str,
        quantity: i32,
    ) -> Result<OrderView, ServiceError> {
        if quantity <= 0 {
            self.find_item(self.base.get_db(), item_name).await?;
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1".into(),
            ));
        }

        let txn = self.base.get_db().begin().await?;

        // Compare-and-swap first so the transaction takes the write lock before
        // any read: stock only drops if it still covers the quantity
        let updated = item::Entity::update_many()
            .col_expr(item::Column::Stock, Expr::col(item::Column::Stock).sub(quantity))
            .filter(item::Column::ItemName.eq(item_name))
            .filter(item::Column::Stock.gte(quantity))
            .exec(&txn)
            .await?;

        let item = self.find_item(&txn, item_name).await?;
        if updated.rows_affected != 1 {
            warn!(item_name, quantity, stock = item.stock, "order refused");
            txn.rollback().await?;
            return Err(insufficient_stock(&item.item_name, item.stock));
        }

        let order = order::ActiveModel {
            item_id: Set(item.item_id),
            quantity: Set(quantity),
            order_date: Set(Local::now().naive_local().trunc_subsecs(0)),
            order_status: Set(OrderStatus::Pending),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(
            order_id = order.order_id,
            item_name,
            quantity,
            remaining = item.stock,
            "order placed"
        );

        Ok(OrderView::from_parts(order, Some(item)))
    }

    async fn list_orders(&self, order_id: Option<i32>) -> Result<Vec<OrderView>, ServiceError> {
        let mut query = order::Entity::find()
            .find_also_related(item::Entity)
            .order_by_asc(order::Column::OrderId);
        if let Some(id) = order_id {
            query = query.filter(order::Column::OrderId.eq(id));
        }

        let rows = query
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::db_error)?;
        Ok(rows
            .into_iter()
            .map(|(order, item)| OrderView::from_parts(order, item))
            .collect())
    }

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<OrderView, ServiceError> {
        let db = self.base.get_db();
        let (existing, item) = order::Entity::find_by_id(order_id)
            .find_also_related(item::Entity)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        let mut active: order::ActiveModel = existing.into();
        active.order_status = Set(status);
        let updated = active.update(db).await.map_err(ServiceError::db_error)?;

        Ok(OrderView::from_parts(updated, item))
    }

    async fn sales_lines(&self, item_name: Option<&str>) -> Result<Vec<SalesLine>, ServiceError> {
        let mut query = order::Entity::find()
            .find_also_related(item::Entity)
            .order_by_asc(order::Column::OrderDate)
            .order_by_asc(order::Column::OrderId);
        if let Some(name) = item_name {
            query = query.filter(item::Column::ItemName.eq(name));
        }

        let rows = query
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::db_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(order, item)| {
                item.map(|item| SalesLine {
                    order_id: order.order_id,
                    item_name: item.item_name,
                    quantity: order.quantity,
                    price: item.price,
                    order_date: order.order_date,
                })
            })
            .collect())
    }
}
