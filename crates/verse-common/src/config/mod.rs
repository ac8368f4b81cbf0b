//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, IdConfig, ServerConfig,
};
