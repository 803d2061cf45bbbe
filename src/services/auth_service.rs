//! 认证服务：注册、登录、用户查询

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    config::AppConfig,
    error::AppError,
    models::user::{NewUser, Plan, User},
    repository::UserStore,
};
use std::sync::Arc;
use uuid::Uuid;

/// 登录失败统一消息，用户不存在、无密码、密码错误三种情况不可区分
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

/// 注册/登录成功的结果
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
    /// 无用户/无密码分支用来校验的占位哈希，与真实哈希同参数
    dummy_hash: String,
    config: Arc<AppConfig>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt_service: Arc<JwtService>,
        config: Arc<AppConfig>,
    ) -> Result<Self, AppError> {
        let hasher = PasswordHasher::from_config(&config.security)?;
        let dummy_hash = hasher.hash(&Uuid::new_v4().to_string())?;

        Ok(Self {
            store,
            jwt_service,
            hasher,
            dummy_hash,
            config,
        })
    }

    /// 用户注册
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<Session, AppError> {
        // 检查邮箱是否已注册
        if self.store.find_by_email(email).await?.is_some() {
            metrics::counter!("auth_register_total", "result" => "conflict").increment(1);
            return Err(AppError::Conflict(
                "user with this email already exists".to_string(),
            ));
        }

        // HTTP 层已校验过，这里不依赖调用方
        PasswordHasher::validate_password_policy(password, self.config.security.password_min_length)?;

        let password_hash = self.hash_password(password).await?;

        let name = name.filter(|n| !n.trim().is_empty());
        let new_user = NewUser {
            email: email.to_string(),
            password_hash: Some(password_hash),
            name,
            plan: Plan::Free,
            email_verified: false,
        };

        // 并发注册同一邮箱时由存储层返回 Conflict
        let mut user = self.store.create(new_user).await?;

        let token = self.jwt_service.issue(user.id, &user.email)?;

        self.stamp_last_login(&mut user).await;

        metrics::counter!("auth_register_total", "result" => "success").increment(1);
        tracing::info!(user_id = %user.id, "User registered");

        Ok(Session { user, token })
    }

    /// 用户登录
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        // 三种失败都要跑一次 Argon2，耗时上不可区分
        let Some(mut user) = self.store.find_by_email(email).await? else {
            self.verify_password(password, self.dummy_hash.clone()).await?;
            return Err(self.login_failed("unknown_email"));
        };

        // 仅通过第三方身份登录的账户没有本地密码
        let Some(password_hash) = user.password_hash.clone() else {
            self.verify_password(password, self.dummy_hash.clone()).await?;
            return Err(self.login_failed("no_password"));
        };

        if !self.verify_password(password, password_hash).await? {
            return Err(self.login_failed("wrong_password"));
        }

        let token = self.jwt_service.issue(user.id, &user.email)?;

        self.stamp_last_login(&mut user).await;

        metrics::counter!("auth_login_total", "result" => "success").increment(1);
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session { user, token })
    }

    /// 根据 ID 获取用户
    pub async fn get_user_by_id(&self, id: Uuid) -> Result<User, AppError> {
        if id.is_nil() {
            return Err(AppError::not_found("user"));
        }

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))
    }

    /// 列出所有用户
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.store.list().await
    }

    /// 记录最后登录时间，失败只记日志，不影响请求结果
    ///
    /// 只有写入成功时返回给调用方的 `last_login_at` 才会更新。
    async fn stamp_last_login(&self, user: &mut User) {
        let previous = user.last_login_at.replace(chrono::Utc::now());

        if let Err(e) = self.store.update(user).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to update last_login_at");
            user.last_login_at = previous;
        }
    }

    fn login_failed(&self, reason: &'static str) -> AppError {
        metrics::counter!("auth_login_total", "result" => "failure").increment(1);
        // 原因只进服务端日志
        tracing::info!(reason, "Login failed");
        AppError::authentication(INVALID_CREDENTIALS)
    }

    /// Argon2 计算放到阻塞线程池
    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: &str, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
    }
}
