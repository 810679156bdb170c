//! Infrastructure layer with adapters for external services.

/// Application configuration.
pub mod config;
/// Image handling (caching, fetching, cancellable loading).
pub mod image;
/// Tracing setup.
pub mod logging;
/// Record storage adapters.
pub mod storage;

pub use config::{AppConfig, ConfigError, LogLevel, StorageManager};
pub use image::{
    CacheStats, CompletionDispatcher, CompletionQueue, HttpImageFetcher, ImageLoader,
    ImageLoaderConfig, MemoryImageCache, SharedImage, completion_channel,
};
pub use logging::init_logging;
pub use storage::JsonRecordStore;
