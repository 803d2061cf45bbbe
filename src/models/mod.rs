//! 数据模型模块
//! 用户实体与认证请求/响应 DTO

pub mod auth;
pub mod user;
