use std::sync::Arc;
use tracing::{info, instrument};

use crate::entities::supplier;
use crate::errors::ServiceError;
use crate::repositories::SupplierStore;

#[derive(Clone)]
pub struct SupplierService {
    store: Arc<dyn SupplierStore>,
}

fn required_fields<'a>(
    supplier_name: &'a str,
    contact_info: &'a str,
) -> Result<(&'a str, &'a str), ServiceError> {
    let name = supplier_name.trim();
    let contact = contact_info.trim();
    if name.is_empty() || contact.is_empty() {
        return Err(ServiceError::ValidationError(
            "Supplier name and contact info are required".into(),
        ));
    }
    Ok((name, contact))
}

impl SupplierService {
    pub fn new(store: Arc<dyn SupplierStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        self.store.list_suppliers().await
    }

    #[instrument(skip(self))]
    pub async fn add_supplier(
        &self,
        supplier_name: &str,
        contact_info: &str,
    ) -> Result<supplier::Model, ServiceError> {
        let (name, contact) = required_fields(supplier_name, contact_info)?;
        let created = self.store.insert_supplier(name, contact).await?;
        info!(supplier_id = created.supplier_id, "supplier added");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn edit_supplier(
        &self,
        supplier_id: i32,
        supplier_name: &str,
        contact_info: &str,
    ) -> Result<supplier::Model, ServiceError> {
        let (name, contact) = required_fields(supplier_name, contact_info)?;
        self.store.update_supplier(supplier_id, name, contact).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(required_fields("  ", "x@example.com").is_err());
        assert!(required_fields("Acme", "").is_err());
        assert_eq!(
            required_fields(" Acme ", " x@example.com ").unwrap(),
            ("Acme", "x@example.com")
        );
    }
}
