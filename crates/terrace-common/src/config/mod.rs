//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig,
};
