//! LinkVault 认证子系统
//! 密码注册/登录、会话令牌签发与校验、请求级认证

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
