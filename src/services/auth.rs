use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::auth::PasswordScheme;
use crate::errors::ServiceError;
use crate::repositories::UserStore;

/// Registration and credential checks.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    scheme: PasswordScheme,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, scheme: PasswordScheme) -> Self {
        Self { users, scheme }
    }

    /// Stores a new user with a hashed credential. No strength rules apply.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ServiceError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::ValidationError(
                "Username and password are required".into(),
            ));
        }

        let hash = self.scheme.hash(password)?;
        self.users.insert_user(username, &hash).await?;
        info!(username, scheme = %self.scheme, "user registered");
        Ok(())
    }

    /// Returns true when a user with this name exists and the password matches.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, ServiceError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            warn!(username, "login for unknown user");
            return Ok(false);
        };

        let matched = PasswordScheme::verify(password, &user.password_hash)?;
        if !matched {
            warn!(username, "login with wrong password");
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user;
    use async_trait::async_trait;
    use dashmap::DashMap;

    #[derive(Default)]
    struct MemoryUsers {
        rows: DashMap<String, String>,
    }

    #[async_trait]
    impl UserStore for MemoryUsers {
        async fn insert_user(
            &self,
            username: &str,
            password_hash: &str,
        ) -> Result<user::Model, ServiceError> {
            if self.rows.contains_key(username) {
                return Err(ServiceError::Conflict("Username already exists".into()));
            }
            self.rows
                .insert(username.to_string(), password_hash.to_string());
            Ok(user::Model {
                user_id: self.rows.len() as i32,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            })
        }

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.rows.get(username).map(|hash| user::Model {
                user_id: 1,
                username: username.to_string(),
                password_hash: hash.value().clone(),
            }))
        }
    }

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryUsers::default()), PasswordScheme::Sha256)
    }

    #[tokio::test]
    async fn register_then_login() {
        let auth = service();
        auth.register("alice", "pw").await.unwrap();
        assert!(auth.login("alice", "pw").await.unwrap());
        assert!(!auth.login("alice", "nope").await.unwrap());
        assert!(!auth.login("bob", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn blank_credentials_and_duplicates_fail() {
        let auth = service();
        assert!(matches!(
            auth.register(" ", "pw").await,
            Err(ServiceError::ValidationError(_))
        ));
        assert!(matches!(
            auth.register("alice", "").await,
            Err(ServiceError::ValidationError(_))
        ));
        auth.register("alice", "pw").await.unwrap();
        assert!(matches!(
            auth.register("alice", "other").await,
            Err(ServiceError::Conflict(_))
        ));
    }
}
