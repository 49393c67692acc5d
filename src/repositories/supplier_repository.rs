use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use std::sync::Arc;

use super::{BaseRepository, Repository, SupplierStore};
use crate::entities::supplier;
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct SupplierRepository {
    base: BaseRepository,
}

impl SupplierRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn duplicate_name(err: sea_orm::DbErr, supplier_name: &str) -> ServiceError {
    match ServiceError::db_error(err) {
        ServiceError::Conflict(_) => {
            ServiceError::Conflict(format!("Supplier {} already exists", supplier_name))
        }
        other => other,
    }
}

#[async_trait]
impl SupplierStore for SupplierRepository {
    async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        supplier::Entity::find()
            .order_by_asc(supplier::Column::SupplierId)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::db_error)
    }

    async fn insert_supplier(
        &self,
        supplier_name: &str,
        contact_info: &str,
    ) -> Result<supplier::Model, ServiceError> {
        supplier::ActiveModel {
            supplier_name: Set(supplier_name.to_string()),
            contact_info: Set(contact_info.to_string()),
            ..Default::default()
        }
        .insert(self.base.get_db())
        .await
        .map_err(|e| duplicate_name(e, supplier_name))
    }

    async fn update_supplier(
        &self,
        supplier_id: i32,
        supplier_name: &str,
        contact_info: &str,
    ) -> Result<supplier::Model, ServiceError> {
        let db = self.base.get_db();
        let existing = supplier::Entity::find_by_id(supplier_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {} not found", supplier_id)))?;

        let mut active: supplier::ActiveModel = existing.into();
        active.supplier_name = Set(supplier_name.to_string());
        active.contact_info = Set(contact_info.to_string());
        active
            .update(db)
            .await
            .map_err(|e| duplicate_name(e, supplier_name))
    }
}
