use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::repositories::order_repository::ORDER_DATE_FORMAT;
use crate::repositories::{InventoryStore, OrderStore, SalesLine};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SalesRow {
    pub order_id: i32,
    pub order_date: String,
    pub quantity: i32,
    pub price: f64,
    /// quantity × price
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlySalesReport {
    pub item_name: String,
    /// Two-digit month, e.g. "05"
    pub month: String,
    pub rows: Vec<SalesRow>,
    pub total_quantity: i64,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    pub quantity: i64,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StockLevel {
    pub item_name: String,
    pub stock: i32,
    pub threshold: i32,
}

/// Accepts "5" or "05"; anything outside 1..=12 is rejected.
pub fn parse_month(month: &str) -> Result<u32, ServiceError> {
    month
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "Month must be between 01 and 12, got '{}'",
                month
            ))
        })
}

/// Keeps the lines whose order falls in `month` (of any year) and totals them.
pub fn summarize_monthly_sales(item_name: &str, month: u32, lines: &[SalesLine]) -> MonthlySalesReport {
    let rows: Vec<SalesRow> = lines
        .iter()
        .filter(|l| l.item_name == item_name && l.order_date.month() == month)
        .map(|l| SalesRow {
            order_id: l.order_id,
            order_date: l.order_date.format(ORDER_DATE_FORMAT).to_string(),
            quantity: l.quantity,
            price: l.price,
            sales: f64::from(l.quantity) * l.price,
        })
        .collect();

    MonthlySalesReport {
        item_name: item_name.to_string(),
        month: format!("{:02}", month),
        total_quantity: rows.iter().map(|r| i64::from(r.quantity)).sum(),
        total_sales: rows.iter().map(|r| r.sales).sum(),
        rows,
    }
}

/// Groups lines by calendar month, oldest first.
pub fn sales_by_month(lines: &[SalesLine]) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    for line in lines {
        let entry = buckets
            .entry(line.order_date.format("%Y-%m").to_string())
            .or_insert((0, 0.0));
        entry.0 += i64::from(line.quantity);
        entry.1 += f64::from(line.quantity) * line.price;
    }
    buckets
        .into_iter()
        .map(|(month, (quantity, sales))| MonthlyTotal {
            month,
            quantity,
            sales,
        })
        .collect()
}

#[derive(Clone)]
pub struct ReportService {
    orders: Arc<dyn OrderStore>,
    inventory: Arc<dyn InventoryStore>,
}

impl ReportService {
    pub fn new(orders: Arc<dyn OrderStore>, inventory: Arc<dyn InventoryStore>) -> Self {
        Self { orders, inventory }
    }

    /// An unknown item yields an empty report rather than an error.
    #[instrument(skip(self))]
    pub async fn monthly_sales(
        &self,
        item_name: &str,
        month: &str,
    ) -> Result<MonthlySalesReport, ServiceError> {
        let month = parse_month(month)?;
        let lines = self.orders.sales_lines(Some(item_name)).await?;
        let report = summarize_monthly_sales(item_name, month, &lines);
        debug!(
            rows = report.rows.len(),
            total_quantity = report.total_quantity,
            "monthly sales computed"
        );
        Ok(report)
    }

    #[instrument(skip(self))]
    pub async fn sales_trend(&self, item_name: Option<&str>) -> Result<Vec<MonthlyTotal>, ServiceError> {
        let lines = self.orders.sales_lines(item_name).await?;
        Ok(sales_by_month(&lines))
    }

    #[instrument(skip(self))]
    pub async fn inventory_levels(&self) -> Result<Vec<StockLevel>, ServiceError> {
        Ok(self
            .inventory
            .list_items()
            .await?
            .into_iter()
            .map(|i| StockLevel {
                item_name: i.item_name,
                stock: i.stock,
                threshold: i.threshold,
            })
            .collect())
    }
}
