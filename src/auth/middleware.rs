//! 会话认证中间件
//!
//! 两种模式共用同一套凭证提取与校验：
//! - `require_auth`：任何一步失败都直接返回 401，不进入后续处理器
//! - `optional_auth`：失败被吞掉，请求照常继续，只有成功时才附加身份

use crate::{
    auth::{credentials::extract_token, jwt::TokenError},
    error::AppError,
    middleware::AppState,
    models::user::User,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::{convert::Infallible, sync::Arc};
use uuid::Uuid;

pub const AUTHORIZATION_REQUIRED: &str = "authorization required";
pub const INVALID_TOKEN: &str = "invalid or expired token";
pub const USER_NOT_FOUND: &str = "user not found";

/// 认证上下文（附加到请求扩展），只在单个请求内存在
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub user_id: Uuid,
    pub email: String,
}

impl AuthContext {
    fn from_user(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            user,
        }
    }
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// 可选身份，供挂在 `optional_auth` 后面的 handler 使用
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for MaybeAuth
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<AuthContext>().cloned()))
    }
}

/// 认证失败的具体阶段，只用于服务端日志
#[derive(Debug)]
pub enum AuthFailure {
    MissingCredential,
    InvalidToken(TokenError),
    UserNotFound,
    Store(AppError),
}

impl AuthFailure {
    /// 转换为对外错误
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthFailure::MissingCredential => AppError::authentication(AUTHORIZATION_REQUIRED),
            AuthFailure::InvalidToken(_) => AppError::authentication(INVALID_TOKEN),
            AuthFailure::UserNotFound => AppError::authentication(USER_NOT_FOUND),
            AuthFailure::Store(e) => e,
        }
    }
}

/// 提取凭证 → 校验令牌 → 加载用户
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthContext, AuthFailure> {
    let token = extract_token(headers).ok_or(AuthFailure::MissingCredential)?;

    let claims = state
        .jwt_service
        .validate(&token)
        .map_err(AuthFailure::InvalidToken)?;

    let user = match state.auth_service.get_user_by_id(claims.user_id).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(AuthFailure::UserNotFound),
        Err(e) => return Err(AuthFailure::Store(e)),
    };

    Ok(AuthContext::from_user(user))
}

/// 会话认证中间件 - 必须认证
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_context = authenticate(&state, req.headers()).await.map_err(|failure| {
        tracing::debug!(?failure, "Authentication rejected");
        failure.into_app_error()
    })?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

/// 可选认证 - 不强制要求令牌
pub async fn optional_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()).await {
        Ok(auth_context) => {
            req.extensions_mut().insert(auth_context);
        }
        Err(AuthFailure::MissingCredential) => {}
        Err(failure) => {
            tracing::debug!(?failure, "Optional authentication skipped");
        }
    }

    next.run(req).await
}
