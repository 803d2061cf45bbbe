//! 认证相关的 HTTP 处理器

use crate::{
    auth::{middleware::AuthContext, MaybeAuth, SESSION_COOKIE_NAME},
    error::AppError,
    middleware::AppState,
    models::{auth::*, user::UserResponse},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    req.validate()?;

    let session = state
        .auth_service
        .register(&req.email, &req.password, req.name)
        .await?;

    let cookie = session_cookie(&state, &session.token)?;

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(SessionResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(session.user),
            token: session.token,
        }),
    ))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    req.validate()?;

    let session = state.auth_service.login(&req.email, &req.password).await?;

    let cookie = session_cookie(&state, &session.token)?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(SessionResponse {
            message: "Logged in successfully".to_string(),
            user: UserResponse::from(session.user),
            token: session.token,
        }),
    ))
}

/// 登出：只清除客户端 Cookie，已签发的令牌在过期前仍然有效
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = Json(json!({"message": "Logged out successfully"}));

    match clear_session_cookie(&state) {
        Ok(cookie) => ([(SET_COOKIE, cookie)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build logout cookie");
            body.into_response()
        }
    }
}

/// 获取当前用户信息
pub async fn me(auth_context: AuthContext) -> Json<serde_json::Value> {
    Json(json!({ "user": UserResponse::from(auth_context.user) }))
}

/// 会话探测（可选认证）
pub async fn session_status(MaybeAuth(auth_context): MaybeAuth) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: auth_context.is_some(),
        user: auth_context.map(|ctx| UserResponse::from(ctx.user)),
    })
}

/// 构造 HttpOnly 会话 Cookie
pub fn session_cookie(state: &AppState, token: &str) -> Result<HeaderValue, AppError> {
    build_cookie(state, token, state.jwt_service.ttl_secs())
}

/// 构造立即过期的 Cookie
pub fn clear_session_cookie(state: &AppState) -> Result<HeaderValue, AppError> {
    build_cookie(state, "", 0)
}

fn build_cookie(state: &AppState, value: &str, max_age: i64) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={value}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax"
    );
    // 仅在 HTTPS 部署时标记 Secure
    if state.config.security.cookie_secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))
}
