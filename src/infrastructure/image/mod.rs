//! Image handling infrastructure.
//!
//! This module provides:
//! - Memory caching with LRU eviction
//! - HTTP payload fetching
//! - Cancellable async loading with completions posted to the UI context

pub mod dispatch;
pub mod http_fetcher;
pub mod loader;
pub mod memory_cache;

pub use dispatch::{Completion, CompletionDispatcher, CompletionQueue, completion_channel};
pub use http_fetcher::HttpImageFetcher;
pub use loader::{ImageLoader, ImageLoaderConfig, SharedImage};
pub use memory_cache::{CacheStats, MemoryImageCache};
