//! HTTP 中间件
//! 应用状态与请求追踪

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    auth::jwt::JwtService, config::AppConfig, error::AppError, repository::UserStore,
    services::AuthService,
};

/// 应用状态
///
/// 服务都用 Arc 包装，多个请求共享同一实例。签名密钥在启动时构建一次，
/// 之后只读，不需要加锁。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub auth_service: Arc<AuthService>,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// 由配置和凭证存储构建应用状态，签名密钥无效时返回 Config 错误
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> Result<Self, AppError> {
        let jwt_service = Arc::new(JwtService::from_config(&config)?);
        let auth_service = Arc::new(AuthService::new(
            store,
            jwt_service.clone(),
            Arc::new(config.clone()),
        )?);

        Ok(Self {
            config,
            auth_service,
            jwt_service,
        })
    }
}

tokio::task_local! {
    /// 当前请求的 request_id，错误响应体与 `x-request-id` 响应头共用
    static REQUEST_ID: String;
}

/// 当前请求的 request_id；不在请求追踪范围内时生成一个新的
pub fn current_request_id() -> String {
    REQUEST_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| Uuid::new_v4().to_string())
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let mut response = REQUEST_ID.scope(request_id.clone(), next.run(req)).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // 指标标签只用有限集合的静态字符串
        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            "PATCH" => "PATCH",
            _ => "OTHER",
        };
        let status_code = match status {
            200 => "200",
            201 => "201",
            400 => "400",
            401 => "401",
            404 => "404",
            500 => "500",
            _ => "other",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_code)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            status = status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        // 在响应头中回传 trace_id / request_id
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
