//! Port definition for fetching raw image payloads.

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::domain::errors::LoadError;

/// Port for retrieving the encoded bytes behind an image URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Fetches the payload at `url`.
    ///
    /// Implementations map connection problems to [`LoadError::Transport`]
    /// and non-2xx responses to [`LoadError::Http`].
    async fn fetch(&self, url: &Url) -> Result<Bytes, LoadError>;
}
