//! Application configuration.

pub mod app_config;
pub mod storage;

pub use app_config::{AppConfig, LogLevel, StoreConfig, TimeConfig};
pub use storage::{ConfigError, StorageManager};
