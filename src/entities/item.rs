use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `inventory` table.
///
/// `stock` is never negative: every write path either validates the new value
/// or decrements with a guarded update.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "inventory")]
#[schema(as = Item)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub item_id: i32,
    #[sea_orm(unique)]
    pub item_name: String,
    pub stock: i32,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    /// Reorder point; the item is low on stock when `stock < threshold`
    pub threshold: i32,
    pub supplier_id: Option<i32>,
}

impl Model {
    pub fn is_low_stock(&self) -> bool {
        self.stock < self.threshold
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::SupplierId",
        on_delete = "SetNull"
    )]
    Supplier,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
