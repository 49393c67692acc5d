use metrics::counter;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::entities::OrderStatus;
use crate::errors::ServiceError;
use crate::repositories::{OrderStore, OrderView};

#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Places an order for `quantity` units of the named item.
    ///
    /// Either the order row is written and stock decremented, or neither happens.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        item_name: &str,
        quantity: i32,
    ) -> Result<OrderView, ServiceError> {
        match self.store.place_order(item_name, quantity).await {
            Ok(order) => {
                counter!("oims_orders.placed", 1);
                Ok(order)
            }
            Err(e) => {
                counter!("oims_orders.rejected", 1);
                Err(e)
            }
        }
    }

    /// All orders, or only the one with `order_id`.
    #[instrument(skip(self))]
    pub async fn track_orders(&self, order_id: Option<i32>) -> Result<Vec<OrderView>, ServiceError> {
        let orders = self.store.list_orders(order_id).await?;
        match order_id {
            Some(id) if orders.is_empty() => {
                Err(ServiceError::NotFound(format!("Order {} not found", id)))
            }
            _ => Ok(orders),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_order(&self, order_id: i32) -> Result<OrderView, ServiceError> {
        self.track_orders(Some(order_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<OrderView, ServiceError> {
        let order = self.store.update_status(order_id, status).await?;
        info!(order_id, status = %status, "order status updated");
        Ok(order)
    }
}
