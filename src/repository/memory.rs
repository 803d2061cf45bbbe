//! In-memory user store

use super::UserStore;
use crate::{
    error::AppError,
    models::user::{NewUser, User},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store keyed by user id. Email uniqueness is enforced under
/// the write lock, so concurrent registrations of one address cannot both win.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed user, bypassing `create`. Used to seed accounts
    /// that registration cannot produce, e.g. identity-provider-only users.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn remove(&self, id: Uuid) -> Option<User> {
        self.users.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(
                "user with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            avatar_url: None,
            email_verified: user.email_verified,
            plan: user.plan,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };

        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::not_found("user"))?;

        stored.name = user.name.clone();
        stored.avatar_url = user.avatar_url.clone();
        stored.email_verified = user.email_verified;
        stored.last_login_at = user.last_login_at;
        stored.updated_at = Utc::now();

        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}
