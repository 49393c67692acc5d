use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of an order. New orders always start as `Pending`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Processing")]
    Processing,
    #[sea_orm(string_value = "Shipped")]
    Shipped,
    #[sea_orm(string_value = "In Transit")]
    #[serde(rename = "In Transit")]
    #[strum(serialize = "In Transit")]
    InTransit,
    #[sea_orm(string_value = "Delivered")]
    Delivered,
}

/// A row of the `orders` table. `order_date` is stored as `YYYY-MM-DD HH:MM:SS`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub order_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub order_date: DateTime,
    pub order_status: OrderStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::ItemId"
    )]
    Item,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_labels_match_stored_values() {
        assert_eq!(OrderStatus::InTransit.to_string(), "In Transit");
        assert_eq!(
            OrderStatus::from_str("In Transit").unwrap(),
            OrderStatus::InTransit
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::InTransit).unwrap(),
            "\"In Transit\""
        );
        assert!(OrderStatus::from_str("Cancelled").is_err());
    }
}
