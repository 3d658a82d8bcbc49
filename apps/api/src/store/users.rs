use chrono::Utc;
use tracing::info;

use super::MemStore;
use crate::errors::AppError;
use crate::models::user::{NewUser, User};

impl MemStore {
    pub async fn get_user(&self, id: i32) -> Option<User> {
        self.tables.read().await.users.get(id).cloned()
    }

    pub async fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Registers a user. Emails are unique; the check and insert share one write lock.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let user = tables.users.insert_with(|id| User {
            id,
            email: new_user.email,
            password: new_user.password,
            name: new_user.name,
            role: new_user.role,
            created_at: Utc::now(),
        });
        info!("Registered user {} ({:?})", user.id, user.role);
        Ok(user)
    }
}
