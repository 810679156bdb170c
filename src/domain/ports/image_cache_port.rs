//! Port definition for decoded image caching.

use std::sync::Arc;

use crate::domain::entities::ImageKey;

/// Port for bounded in-memory image caches.
/// Implementations must be thread-safe and must never block on I/O.
pub trait ImageCachePort: Send + Sync {
    /// Returns the cached image and marks it recently used.
    fn get(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>>;

    /// Returns the cached image without touching recency.
    fn peek(&self, key: &ImageKey) -> Option<Arc<image::DynamicImage>>;

    /// Stores an image, evicting if the capacity bound would be exceeded.
    fn put(&self, key: ImageKey, image: Arc<image::DynamicImage>);

    /// Removes an image from the cache.
    fn evict(&self, key: &ImageKey);

    /// Returns the current number of cached images.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all images from the cache.
    fn clear(&self);
}
