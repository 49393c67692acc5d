use crate::entities::{item, supplier};
use crate::errors::ServiceError;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use tracing::debug;

/// (name, contact)
pub const SAMPLE_SUPPLIERS: &[(&str, &str)] = &[
    ("Acme Components", "orders@acme.example"),
    ("Northwind Traders", "+1-555-0100"),
];

/// (name, stock, price, threshold, supplier name)
pub const SAMPLE_ITEMS: &[(&str, i32, f64, i32, &str)] = &[
    ("Widget", 120, 2.5, 20, "Acme Components"),
    ("Gadget", 8, 14.99, 10, "Acme Components"),
    ("Sprocket", 45, 0.75, 50, "Northwind Traders"),
    ("Gizmo", 30, 39.0, 5, "Northwind Traders"),
];

/// Inserts the fixed sample suppliers and items, skipping rows whose names already exist.
/// Returns the number of rows actually inserted.
pub async fn seed_sample_data<C>(db: &C) -> Result<u64, ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let suppliers = SAMPLE_SUPPLIERS
        .iter()
        .map(|(name, contact)| supplier::ActiveModel {
            supplier_name: Set((*name).to_string()),
            contact_info: Set((*contact).to_string()),
            ..Default::default()
        });
    let mut inserted = supplier::Entity::insert_many(suppliers)
        .on_conflict(
            OnConflict::column(supplier::Column::SupplierName)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

    let mut items = Vec::with_capacity(SAMPLE_ITEMS.len());
    for (name, stock, price, threshold, supplier_name) in SAMPLE_ITEMS {
        let supplier_id = supplier::Entity::find()
            .filter(supplier::Column::SupplierName.eq(*supplier_name))
            .one(&txn)
            .await?
            .map(|s| s.supplier_id);
        items.push(item::ActiveModel {
            item_name: Set((*name).to_string()),
            stock: Set(*stock),
            price: Set(*price),
            threshold: Set(*threshold),
            supplier_id: Set(supplier_id),
            ..Default::default()
        });
    }
    inserted += item::Entity::insert_many(items)
        .on_conflict(
            OnConflict::column(item::Column::ItemName)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

    txn.commit().await?;
    debug!(inserted, "sample rows written");
    Ok(inserted)
}
