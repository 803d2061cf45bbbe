//! Credential store layer
//!
//! [`UserStore`] is the narrow interface the auth subsystem talks to. Two
//! implementations ship with the crate: [`UserRepository`] over PostgreSQL and
//! [`MemoryUserStore`] for tests and local development.

pub mod memory;
pub mod user_repo;

pub use memory::MemoryUserStore;
pub use user_repo::UserRepository;

use crate::{
    error::AppError,
    models::user::{NewUser, User},
};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence of user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive lookup by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Insert a user; `AppError::Conflict` if the email is already taken
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Persist the mutable fields of an existing user
    async fn update(&self, user: &User) -> Result<(), AppError>;

    async fn list(&self) -> Result<Vec<User>, AppError>;
}
