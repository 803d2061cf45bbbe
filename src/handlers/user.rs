//! 用户查询的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext, error::AppError, middleware::AppState,
    models::user::UserResponse,
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// 列出用户
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
) -> Result<Json<serde_json::Value>, AppError> {
    let users = state.auth_service.list_users().await?;

    let user_responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(json!({ "data": user_responses })))
}

/// 获取用户详情
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::validation("invalid user ID format"))?;

    let user = state.auth_service.get_user_by_id(id).await?;

    Ok(Json(json!({ "data": UserResponse::from(user) })))
}
