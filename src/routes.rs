//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{auth, handlers, middleware::AppState};

/// 请求体上限，认证接口的 JSON 都很小
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new().route("/health", get(handlers::health::health_check));

    // 认证路由（无需认证）
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout));

    // 可选认证：有身份就带上，没有也放行
    let optional_routes = Router::new()
        .route("/api/session", get(handlers::auth::session_status))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::optional_auth,
        ));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        .route("/api/users", get(handlers::user::list_users))
        .route("/api/users/{id}", get(handlers::user::get_user))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(optional_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
