//! User repository (数据库访问层)

use super::UserStore;
use crate::{
    error::AppError,
    models::user::{NewUser, User},
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 创建用户，邮箱唯一约束冲突时返回 Conflict
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, name, plan, email_verified)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.plan)
        .bind(user.email_verified)
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict("user with this email already exists".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// 更新用户
    async fn update(&self, user: &User) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                name = $2,
                avatar_url = $3,
                email_verified = $4,
                last_login_at = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.avatar_url)
        .bind(user.email_verified)
        .bind(user.last_login_at)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("user"));
        }

        Ok(())
    }

    /// 列出所有用户
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.db)
            .await?;

        Ok(users)
    }
}
