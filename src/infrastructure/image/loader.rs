//! Cancellable remote image loader.
//!
//! Serves decoded images from the memory cache, otherwise fetches and decodes
//! them on the runtime. Each fetch is tracked by a [`LoadToken`] so callers
//! can cancel their own request without affecting anyone else's.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::domain::entities::{ImageKey, LoadToken};
use crate::domain::errors::LoadError;
use crate::domain::ports::{ImageCachePort, ImageFetcherPort};

use super::dispatch::CompletionDispatcher;
use super::http_fetcher::HttpImageFetcher;
use super::memory_cache::{CacheStats, DEFAULT_CACHE_SIZE, MemoryImageCache};

/// Decoded image handed to completion callbacks.
pub type SharedImage = Arc<image::DynamicImage>;

/// Configuration for the image loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLoaderConfig {
    /// Maximum images in memory cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Request timeout in seconds. `0` disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// User agent sent with image requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_SIZE
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

impl ImageLoaderConfig {
    /// Returns the request timeout, or `None` when it is disabled.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            request_timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

type CancelHandle = oneshot::Sender<()>;

/// Live tokens and the handles that cancel their fetch tasks.
/// Reads share the lock; inserts and removals are exclusive.
#[derive(Default)]
struct InFlightTable {
    entries: RwLock<HashMap<LoadToken, CancelHandle>>,
}

impl InFlightTable {
    fn insert(&self, token: LoadToken, handle: CancelHandle) {
        self.entries.write().insert(token, handle);
    }

    /// Removes the entry. Only the first caller for a token gets the handle.
    fn remove(&self, token: LoadToken) -> Option<CancelHandle> {
        self.entries.write().remove(&token)
    }

    fn drain(&self) -> Vec<(LoadToken, CancelHandle)> {
        self.entries.write().drain().collect()
    }

    fn contains(&self, token: LoadToken) -> bool {
        self.entries.read().contains_key(&token)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Loads remote images with a shared bounded cache.
///
/// One instance is meant to live for the whole process, shared via `Arc`.
/// Every method may be called from any thread and none of them block.
pub struct ImageLoader {
    cache: Arc<MemoryImageCache>,
    in_flight: Arc<InFlightTable>,
    fetcher: Arc<dyn ImageFetcherPort>,
    dispatcher: CompletionDispatcher,
    runtime: Handle,
    config: ImageLoaderConfig,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("config", &self.config)
            .field("pending", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl ImageLoader {
    /// Creates a loader that fetches through `fetcher` and spawns its work on
    /// `runtime`. Completions are posted to `dispatcher`.
    #[must_use]
    pub fn new(
        config: ImageLoaderConfig,
        fetcher: Arc<dyn ImageFetcherPort>,
        dispatcher: CompletionDispatcher,
        runtime: Handle,
    ) -> Self {
        let cache = Arc::new(MemoryImageCache::new(config.cache_capacity));
        info!(
            capacity = cache.capacity(),
            timeout = ?config.request_timeout(),
            "Image loader ready"
        );

        Self {
            cache,
            in_flight: Arc::new(InFlightTable::default()),
            fetcher,
            dispatcher,
            runtime,
            config,
        }
    }

    /// Creates a loader backed by [`HttpImageFetcher`].
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_http(
        config: ImageLoaderConfig,
        dispatcher: CompletionDispatcher,
        runtime: Handle,
    ) -> Result<Self, LoadError> {
        let fetcher = Arc::new(HttpImageFetcher::new(&config)?);
        Ok(Self::new(config, fetcher, dispatcher, runtime))
    }

    /// Loads the image at `url`.
    ///
    /// `on_complete` runs exactly once, on the completion queue, with the
    /// decoded image or `None`. A token is returned only when a network fetch
    /// was started; invalid URLs and cache hits have nothing to cancel.
    pub fn load<F>(&self, url: Option<&str>, on_complete: F) -> Option<LoadToken>
    where
        F: FnOnce(Option<SharedImage>) + Send + 'static,
    {
        let key = match url
            .ok_or_else(|| LoadError::invalid_input("no url"))
            .and_then(ImageKey::parse)
        {
            Ok(key) => key,
            Err(e) => {
                debug!(error = %e, "Rejected image load");
                self.dispatcher.dispatch(move || on_complete(None));
                return None;
            }
        };

        if let Some(image) = self.cache.get(&key) {
            self.dispatcher.dispatch(move || on_complete(Some(image)));
            return None;
        }

        let token = LoadToken::new();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.in_flight.insert(token, cancel_tx);

        debug!(token = %token, key = %key, "Dispatching image fetch");

        let job = FetchJob {
            cache: self.cache.clone(),
            in_flight: self.in_flight.clone(),
            fetcher: self.fetcher.clone(),
            dispatcher: self.dispatcher.clone(),
        };
        self.runtime.spawn(job.run(token, key, cancel_rx, on_complete));

        Some(token)
    }

    /// Cancels a pending load. Unknown or finished tokens are ignored.
    ///
    /// The load's completion still runs, normally with `None`.
    pub fn cancel(&self, token: Option<LoadToken>) {
        let Some(token) = token else {
            return;
        };

        if let Some(handle) = self.in_flight.remove(token) {
            let _ = handle.send(());
            debug!(token = %token, "Cancelled image load");
        }
    }

    /// Cancels every pending load.
    pub fn cancel_all(&self) {
        let drained = self.in_flight.drain();
        let count = drained.len();
        for (_, handle) in drained {
            let _ = handle.send(());
        }
        if count > 0 {
            debug!(count = count, "Cancelled all pending image loads");
        }
    }

    /// Returns true if the token's fetch has not finished yet.
    #[must_use]
    pub fn is_loading(&self, token: LoadToken) -> bool {
        self.in_flight.contains(token)
    }

    /// Returns the number of fetches in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Returns the cached image for `url` without starting a fetch or
    /// touching LRU order.
    #[must_use]
    pub fn cached(&self, url: &str) -> Option<SharedImage> {
        let key = ImageKey::parse(url).ok()?;
        self.cache.peek(&key)
    }

    /// Returns memory cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drops every cached image.
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Cleared image cache");
    }

    /// Returns the loader configuration.
    #[must_use]
    pub const fn config(&self) -> &ImageLoaderConfig {
        &self.config
    }
}

/// Everything a spawned fetch needs, detached from the loader.
struct FetchJob {
    cache: Arc<MemoryImageCache>,
    in_flight: Arc<InFlightTable>,
    fetcher: Arc<dyn ImageFetcherPort>,
    dispatcher: CompletionDispatcher,
}

impl FetchJob {
    async fn run<F>(
        self,
        token: LoadToken,
        key: ImageKey,
        cancel_rx: oneshot::Receiver<()>,
        on_complete: F,
    ) where
        F: FnOnce(Option<SharedImage>) + Send + 'static,
    {
        // A dropped handle counts as cancellation too.
        let outcome = tokio::select! {
            biased;
            _ = cancel_rx => Err(LoadError::Cancelled),
            result = AssertUnwindSafe(self.fetch_and_decode(&key)).catch_unwind() => {
                result.unwrap_or_else(|_| Err(LoadError::transport("Image fetch panicked")))
            }
        };

        self.in_flight.remove(token);

        let image = match outcome {
            Ok(image) => {
                self.cache.put(key.clone(), image.clone());
                debug!(
                    token = %token,
                    key = %key,
                    width = image.width(),
                    height = image.height(),
                    "Image loaded"
                );
                Some(image)
            }
            Err(e) if e.is_cancelled() => {
                debug!(token = %token, key = %key, "Image load cancelled");
                None
            }
            Err(e) => {
                debug!(
                    token = %token,
                    key = %key,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Image load failed"
                );
                None
            }
        };

        self.dispatcher.dispatch(move || on_complete(image));
    }

    async fn fetch_and_decode(&self, key: &ImageKey) -> Result<SharedImage, LoadError> {
        let bytes = self.fetcher.fetch(key.url()).await?;

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| LoadError::decode(format!("Decode task panicked: {e}")))?
            .map_err(|e| LoadError::decode(e.to_string()))?;

        Ok(Arc::new(decoded))
    }
}
