//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:8080"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL（使用 Secret 包装，防止日志泄露）
    pub url: Secret<String>,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 连接最大生命周期（秒）
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// 会话令牌签名密钥，没有默认值，缺失时启动失败
    pub jwt_secret: Secret<String>,
    /// 会话令牌有效期（秒）
    pub token_ttl_secs: u64,
    /// 密码最小长度（字符数）
    pub password_min_length: usize,
    /// 会话 Cookie 是否带 Secure 标记（HTTPS 部署时开启）
    pub cookie_secure: bool,
    /// Argon2 内存开销（KiB）
    pub hash_memory_kib: u32,
    /// Argon2 迭代次数
    pub hash_iterations: u32,
    /// Argon2 并行度
    pub hash_parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:8080")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.token_ttl_secs", 86400)?
            .set_default("security.password_min_length", 8)?
            .set_default("security.cookie_secure", false)?
            .set_default("security.hash_memory_kib", 65536)?
            .set_default("security.hash_iterations", 3)?
            .set_default("security.hash_parallelism", 4)?;

        // 从环境变量加载配置（前缀为 LINKVAULT_）
        settings = settings.add_source(
            Environment::with_prefix("LINKVAULT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证数据库连接池配置
        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        // HS256 密钥至少 32 字节
        if self.security.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.security.token_ttl_secs < 60 || self.security.token_ttl_secs > 2_592_000 {
            return Err(ConfigError::Message(
                "token_ttl_secs must be between 60 and 2592000 (1 minute to 30 days)".to_string(),
            ));
        }

        if self.security.password_min_length < 8 || self.security.password_min_length > 128 {
            return Err(ConfigError::Message(
                "password_min_length must be between 8 and 128".to_string(),
            ));
        }

        if self.security.hash_iterations == 0 || self.security.hash_parallelism == 0 {
            return Err(ConfigError::Message(
                "hash_iterations and hash_parallelism must be >= 1".to_string(),
            ));
        }

        // Argon2 要求 m >= 8 * p
        if self.security.hash_memory_kib < 8 * self.security.hash_parallelism {
            return Err(ConfigError::Message(
                "hash_memory_kib must be at least 8 * hash_parallelism".to_string(),
            ));
        }

        Ok(())
    }
}
