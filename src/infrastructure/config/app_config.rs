//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infrastructure::image::ImageLoaderConfig;

const APP_NAME: &str = "wardrobe";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

/// Application configuration, read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Remote image loading.
    #[serde(default)]
    pub images: ImageLoaderConfig,

    /// Time display and the home zone for trip deltas.
    #[serde(default)]
    pub time: TimeConfig,

    /// Record storage.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Time display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// IANA zone that "ahead"/"behind" deltas are measured against.
    #[serde(default = "default_home_time_zone")]
    pub home_time_zone: String,

    /// Clock format string (chrono strftime).
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            home_time_zone: default_home_time_zone(),
            time_format: default_time_format(),
        }
    }
}

/// Record storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Record file path. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_home_time_zone() -> String {
    "UTC".to_string()
}

fn default_time_format() -> String {
    "%H:%M".to_string()
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("wardrobe.log"))
    }

    /// Returns default record file path.
    #[must_use]
    pub fn default_store_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("wardrobe.json"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective record file path.
    #[must_use]
    pub fn effective_store_path(&self) -> Option<PathBuf> {
        self.store.path.clone().or_else(Self::default_store_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            images: ImageLoaderConfig::default(),
            time: TimeConfig::default(),
            store: StoreConfig::default(),
        }
    }
}
