use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;

use super::{BaseRepository, Repository, UserStore};
use crate::entities::user;
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<user::Model, ServiceError> {
        user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            ..Default::default()
        }
        .insert(self.base.get_db())
        .await
        .map_err(|e| match ServiceError::db_error(e) {
            ServiceError::Conflict(_) => ServiceError::Conflict("Username already exists".into()),
            other => other,
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::db_error)
    }
}
