//! 错误处理单元测试
//!
//! 测试应用错误类型的状态码、对外消息和响应格式

use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use linkvault::error::AppError;

// ==================== 错误状态码测试 ====================

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        AppError::Authentication("test".to_string()).status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(AppError::NotFound("user".to_string()).status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::Validation("error".to_string()).status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::Conflict("dup".to_string()).status_code(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_server_side_errors_are_500() {
    let errors = [
        AppError::Database(sqlx::Error::RowNotFound),
        AppError::Config("Invalid config".to_string()),
        AppError::Internal("Something went wrong".to_string()),
    ];

    for error in errors {
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code(), 500);
    }
}

// ==================== 对外消息测试 ====================

#[test]
fn test_user_message_hides_internal_details() {
    let error = AppError::Internal("connection string postgres://secret".to_string());
    assert_eq!(error.user_message(), "internal server error");

    let error = AppError::Database(sqlx::Error::PoolTimedOut);
    assert_eq!(error.user_message(), "database error occurred");

    let error = AppError::Config("jwt secret missing".to_string());
    assert!(!error.user_message().contains("jwt"));
}

#[test]
fn test_user_message_passes_client_errors() {
    assert_eq!(
        AppError::authentication("invalid email or password").user_message(),
        "invalid email or password"
    );
    assert_eq!(AppError::Unauthorized.user_message(), "authentication required");
    assert_eq!(AppError::validation("bad email").user_message(), "bad email");
    assert_eq!(AppError::not_found("user").user_message(), "resource not found: user");
}

#[test]
fn test_from_sqlx_error() {
    let error: AppError = sqlx::Error::RowNotFound.into();
    assert!(matches!(error, AppError::Database(_)));
}

// ==================== 响应格式测试 ====================

#[tokio::test]
async fn test_into_response_body() {
    let response = AppError::authentication("invalid email or password").into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"]["code"], 401);
    assert_eq!(json["error"]["message"], "invalid email or password");
    assert!(json["error"]["request_id"].is_string());
}

#[tokio::test]
async fn test_internal_error_response_is_generic() {
    let response = AppError::Internal("stack trace here".to_string()).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(!body.contains("stack trace"));
    assert!(body.contains("internal server error"));
}
